//! End-to-end scenarios against the game actor, driven with scripted dice
//! and recording sinks.

use gridduel_server::{
    spawn_actor, Action, ConnectionId, GameActor, GameRules, RecordingSink, ScriptedDice,
    ServerConfig,
};
use gridduel_shared::{
    ChatFrom, Coord, PowerUpKind, Role, ServerMessage, GRID_SIZE, MAX_CHAT_LEN, MAX_NAME_LEN,
};

type Actor = GameActor<ScriptedDice>;

fn actor_with(config: &ServerConfig, dice: ScriptedDice) -> Actor {
    GameActor::new(config, dice)
}

fn join(actor: &mut Actor, id: u64) -> RecordingSink {
    let sink = RecordingSink::new();
    actor.process(Action::Join {
        id: ConnectionId(id),
        sink: Box::new(sink.clone()),
    });
    sink
}

fn act(actor: &mut Actor, action: Action) {
    assert!(actor.process(action));
}

fn move_to(actor: &mut Actor, id: u64, x: i32, y: i32) {
    act(actor, Action::Move { id: ConnectionId(id), to: Coord::new(x, y) });
}

fn attack(actor: &mut Actor, id: u64, x: i32, y: i32) {
    act(actor, Action::Attack { id: ConnectionId(id), target: Coord::new(x, y) });
}

fn roll(actor: &mut Actor, id: u64) {
    act(actor, Action::Roll { id: ConnectionId(id) });
}

fn errors(sink: &RecordingSink) -> Vec<String> {
    sink.messages()
        .into_iter()
        .filter_map(|m| match m {
            ServerMessage::Error { message } => Some(message),
            _ => None,
        })
        .collect()
}

fn assigned(sink: &RecordingSink) -> Option<Role> {
    sink.messages().into_iter().rev().find_map(|m| match m {
        ServerMessage::Assigned { role } => Some(role),
        _ => None,
    })
}

/// Brings both units next to each other with player B to move:
/// A (0,0)→(3,3), B (8,8)→(5,5), A (3,3)→(4,4).
fn adjacent_duel(config: &ServerConfig, dice: ScriptedDice) -> (Actor, RecordingSink, RecordingSink) {
    let mut actor = actor_with(config, dice);
    let a = join(&mut actor, 1);
    let b = join(&mut actor, 2);
    move_to(&mut actor, 1, 3, 3);
    move_to(&mut actor, 2, 5, 5);
    move_to(&mut actor, 1, 4, 4);
    assert_eq!(actor.state().turn(), Role::PlayerB);
    a.drain();
    b.drain();
    (actor, a, b)
}

/// Every living unit's cell carries its marker and nothing else is marked;
/// power-ups are capped and never under a unit.
fn assert_board_consistent(actor: &Actor) {
    let state = actor.state();
    let mut living = 0;
    for role in [Role::PlayerA, Role::PlayerB] {
        let unit = state.unit(role).unwrap();
        if unit.is_alive() {
            living += 1;
            assert_eq!(state.grid().get(unit.position), Some(role));
        }
    }
    assert_eq!(state.grid().occupied(), living);
    assert!(state.power_ups().len() <= state.rules().max_power_ups);
    for power_up in state.power_ups() {
        assert!(state.grid().is_empty(power_up.position));
    }
}

// ============================================================================
// ROSTER
// ============================================================================

#[test]
fn test_join_assigns_players_then_spectators() {
    let mut actor = actor_with(&ServerConfig::default(), ScriptedDice::new());
    let a = join(&mut actor, 1);
    let b = join(&mut actor, 2);
    let s = join(&mut actor, 3);

    assert_eq!(assigned(&a), Some(Role::PlayerA));
    assert_eq!(assigned(&b), Some(Role::PlayerB));
    assert_eq!(assigned(&s), Some(Role::Spectator));

    let first = s.messages();
    assert!(matches!(first[0], ServerMessage::Assigned { role: Role::Spectator }));
    assert!(matches!(first[1], ServerMessage::State { .. }));
    assert_eq!(first[2], ServerMessage::system("spectator joined"));
    assert!(a.messages().contains(&ServerMessage::system("player_b joined")));
}

#[test]
fn test_eleventh_connection_rejected() {
    let mut actor = actor_with(&ServerConfig::default(), ScriptedDice::new());
    for id in 1..=10 {
        join(&mut actor, id);
    }
    let late = join(&mut actor, 11);

    assert_eq!(actor.roster().len(), 10);
    assert!(late.is_closed());
    assert_eq!(errors(&late), vec!["server full: 10 clients already connected".to_string()]);
}

#[test]
fn test_leave_keeps_unit_and_frees_slot() {
    let mut actor = actor_with(&ServerConfig::default(), ScriptedDice::new());
    let _a = join(&mut actor, 1);
    let b = join(&mut actor, 2);
    move_to(&mut actor, 1, 2, 2);

    act(&mut actor, Action::Leave { id: ConnectionId(1) });
    assert!(b.messages().contains(&ServerMessage::system("player_a left")));
    assert_eq!(actor.state().grid().get(Coord::new(2, 2)), Some(Role::PlayerA));
    assert_eq!(actor.state().seated(Role::PlayerA), None);

    let c = join(&mut actor, 3);
    assert_eq!(assigned(&c), Some(Role::PlayerA));
    assert_eq!(actor.state().unit(Role::PlayerA).unwrap().position, Coord::new(2, 2));
}

#[test]
fn test_unknown_leave_is_silent() {
    let mut actor = actor_with(&ServerConfig::default(), ScriptedDice::new());
    let a = join(&mut actor, 1);
    a.drain();
    act(&mut actor, Action::Leave { id: ConnectionId(99) });
    assert!(a.messages().is_empty());
    assert_eq!(actor.roster().len(), 1);
}

#[test]
fn test_slow_client_is_dropped_without_affecting_others() {
    let mut actor = actor_with(&ServerConfig::default(), ScriptedDice::new());
    let a = join(&mut actor, 1);
    let slow = RecordingSink::bounded(3);
    act(
        &mut actor,
        Action::Join {
            id: ConnectionId(2),
            sink: Box::new(slow.clone()),
        },
    );
    a.drain();

    move_to(&mut actor, 1, 1, 1);
    assert!(slow.is_closed());
    assert!(matches!(a.last(), Some(ServerMessage::State { .. })));
    assert_eq!(actor.state().turn(), Role::PlayerB);
}

// ============================================================================
// MOVEMENT
// ============================================================================

#[test]
fn test_move_validation_errors_are_private() {
    let mut actor = actor_with(&ServerConfig::default(), ScriptedDice::new());
    let a = join(&mut actor, 1);
    let b = join(&mut actor, 2);
    let s = join(&mut actor, 3);
    a.drain();
    b.drain();

    move_to(&mut actor, 2, 7, 7);
    move_to(&mut actor, 3, 1, 1);
    move_to(&mut actor, 1, 5, 5);

    assert_eq!(errors(&b), vec!["not your turn".to_string()]);
    assert_eq!(errors(&s), vec!["spectators cannot move".to_string()]);
    assert_eq!(errors(&a), vec!["too far: 5 cells, max 3".to_string()]);
    assert_eq!(actor.state().turn(), Role::PlayerA);
    assert_eq!(actor.stats().rejected, 3);
}

#[test]
fn test_move_flips_turn_and_broadcasts_state() {
    let mut actor = actor_with(&ServerConfig::default(), ScriptedDice::new());
    let a = join(&mut actor, 1);
    let b = join(&mut actor, 2);
    b.drain();

    move_to(&mut actor, 1, 0, 3);
    let Some(ServerMessage::State { game }) = b.last() else {
        panic!("expected state broadcast");
    };
    assert_eq!(game.turn, Role::PlayerB);
    assert_eq!(game.grid[3][0], Some(Role::PlayerA));
    assert_eq!(game.grid[0][0], None);
    assert!(errors(&a).is_empty());
}

// ============================================================================
// COMBAT
// ============================================================================

#[test]
fn test_scripted_combat_four_versus_two() {
    let dice = ScriptedDice::new().with_rolls([4, 2]);
    let (mut actor, a, b) = adjacent_duel(&ServerConfig::default(), dice);

    attack(&mut actor, 2, 4, 4);
    let start = ServerMessage::CombatStart {
        attacker: Role::PlayerB,
        defender: Role::PlayerA,
        attacker_rolled: false,
        defender_rolled: false,
    };
    assert_eq!(a.last(), Some(start.clone()));
    assert_eq!(b.last(), Some(start));

    // Defender cannot go first.
    roll(&mut actor, 1);
    assert_eq!(errors(&a), vec!["attacker must roll first".to_string()]);
    assert!(errors(&b).is_empty());

    roll(&mut actor, 2);
    assert_eq!(
        b.last(),
        Some(ServerMessage::CombatRolled {
            attacker: Role::PlayerB,
            defender: Role::PlayerA,
            attacker_rolled: true,
            defender_rolled: false,
            attacker_roll: Some(4),
        })
    );

    // A second attacker roll is ignored.
    let before = b.messages().len();
    roll(&mut actor, 2);
    assert_eq!(b.messages().len(), before);

    roll(&mut actor, 1);
    let Some(ServerMessage::Combat { result, game }) = a.last() else {
        panic!("expected combat result");
    };
    assert_eq!(result.attacker_roll, 4);
    assert_eq!(result.defender_roll, 2);
    assert_eq!(result.winner, Role::PlayerB);
    assert_eq!(result.damage, 2);
    assert_eq!(result.loser_hp, 8);
    assert!(!result.eliminated);
    assert_eq!(game.turn, Role::PlayerA);
    assert!(game.combat.is_none());
    assert_eq!(actor.state().unit(Role::PlayerA).unwrap().hp, 8);
    assert_board_consistent(&actor);
}

#[test]
fn test_tie_goes_to_attacker() {
    let dice = ScriptedDice::new().with_rolls([3, 3]);
    let (mut actor, a, _b) = adjacent_duel(&ServerConfig::default(), dice);

    attack(&mut actor, 2, 4, 4);
    roll(&mut actor, 2);
    roll(&mut actor, 1);

    let Some(ServerMessage::Combat { result, .. }) = a.last() else {
        panic!("expected combat result");
    };
    assert_eq!(result.winner, Role::PlayerB);
    assert_eq!(result.damage, 1);
    assert_eq!(actor.state().unit(Role::PlayerA).unwrap().hp, 9);
}

#[test]
fn test_defender_can_win_the_exchange() {
    let dice = ScriptedDice::new().with_rolls([1, 6]);
    let (mut actor, _a, b) = adjacent_duel(&ServerConfig::default(), dice);

    attack(&mut actor, 2, 4, 4);
    roll(&mut actor, 2);
    roll(&mut actor, 1);

    let Some(ServerMessage::Combat { result, .. }) = b.last() else {
        panic!("expected combat result");
    };
    assert_eq!(result.winner, Role::PlayerA);
    assert_eq!(result.damage, 5);
    assert_eq!(actor.state().unit(Role::PlayerB).unwrap().hp, 5);
    assert_eq!(actor.state().unit(Role::PlayerA).unwrap().hp, 10);
}

#[test]
fn test_no_actions_while_combat_pending() {
    let dice = ScriptedDice::new().with_rolls([5, 5]);
    let (mut actor, a, b) = adjacent_duel(&ServerConfig::default(), dice);

    attack(&mut actor, 2, 4, 4);
    move_to(&mut actor, 2, 6, 6);
    attack(&mut actor, 2, 4, 4);
    move_to(&mut actor, 1, 3, 3);

    assert_eq!(
        errors(&b),
        vec!["a combat is already in progress".to_string(), "a combat is already in progress".to_string()]
    );
    assert_eq!(errors(&a), vec!["a combat is already in progress".to_string()]);
    assert_eq!(actor.state().unit(Role::PlayerB).unwrap().position, Coord::new(5, 5));
}

#[test]
fn test_roll_outside_combat_is_private_error() {
    let (mut actor, a, b) = adjacent_duel(&ServerConfig::default(), ScriptedDice::new().with_rolls([4, 2]));
    let s = join(&mut actor, 3);
    a.drain();
    b.drain();
    s.drain();

    roll(&mut actor, 3);
    assert_eq!(errors(&s), vec!["no combat in progress".to_string()]);

    attack(&mut actor, 2, 4, 4);
    a.drain();
    b.drain();
    s.drain();
    let phase = *actor.state().combat().phase();

    roll(&mut actor, 3);
    assert_eq!(s.drain(), vec![ServerMessage::error("you are not part of this combat")]);
    assert!(a.messages().is_empty());
    assert!(b.messages().is_empty());
    assert_eq!(*actor.state().combat().phase(), phase);
    assert_eq!(actor.stats().rejected, 2);
}

#[test]
fn test_snapshot_hides_pending_dice() {
    let dice = ScriptedDice::new().with_rolls([6, 1]);
    let (mut actor, _a, _b) = adjacent_duel(&ServerConfig::default(), dice);
    attack(&mut actor, 2, 4, 4);

    let snapshot = actor.state().snapshot();
    let combat = snapshot.combat.unwrap();
    assert_eq!(combat.attacker, Role::PlayerB);
    assert!(!combat.attacker_rolled);

    let json = serde_json::to_string(&ServerMessage::State { game: snapshot }).unwrap();
    assert!(!json.contains("\"attackerRoll\""));
    assert!(!json.contains("\"defenderRoll\""));
}

#[test]
fn test_attack_rejections() {
    let (mut actor, _a, b) = adjacent_duel(&ServerConfig::default(), ScriptedDice::new());

    attack(&mut actor, 2, 3, 3);
    attack(&mut actor, 2, 9, 4);
    assert_eq!(
        errors(&b),
        vec!["no enemy unit at target".to_string(), "position (9, 4) is off the board".to_string()]
    );
    assert!(actor.state().combat().is_idle());
}

#[test]
fn test_elimination_ends_game() {
    let config = ServerConfig {
        rules: GameRules { max_hp: 2, ..GameRules::default() },
        ..ServerConfig::default()
    };
    let dice = ScriptedDice::new().with_rolls([6, 1]);
    let (mut actor, a, b) = adjacent_duel(&config, dice);

    attack(&mut actor, 2, 4, 4);
    roll(&mut actor, 2);
    roll(&mut actor, 1);

    let Some(ServerMessage::Combat { result, game }) = b.last() else {
        panic!("expected combat result");
    };
    assert!(result.eliminated);
    assert_eq!(result.loser_hp, 0);
    assert_eq!(game.winner, Some(Role::PlayerB));
    assert_eq!(game.grid[4][4], None);
    assert_board_consistent(&actor);

    move_to(&mut actor, 1, 3, 3);
    move_to(&mut actor, 2, 6, 6);
    assert_eq!(errors(&a), vec!["game is over, player_b won".to_string()]);
    assert_eq!(errors(&b), vec!["game is over, player_b won".to_string()]);
}

#[test]
fn test_boosted_attack_skips_dice() {
    // First spawn roll lands an attack boost on (5,5), free-cell index 49
    // with A on (3,3) and B on (8,8).
    let dice = ScriptedDice::new().with_chances([true]).with_picks([49]).with_coins([false]);
    let mut actor = actor_with(&ServerConfig::default(), dice);
    let a = join(&mut actor, 1);
    let b = join(&mut actor, 2);

    move_to(&mut actor, 1, 3, 3);
    assert_eq!(actor.state().power_ups().len(), 1);
    assert_eq!(actor.state().power_ups()[0].kind, PowerUpKind::AttackBoost);
    assert_eq!(actor.state().power_ups()[0].position, Coord::new(5, 5));

    move_to(&mut actor, 2, 5, 5);
    assert!(actor.state().unit(Role::PlayerB).unwrap().boosted);
    assert!(actor.state().power_ups().is_empty());

    move_to(&mut actor, 1, 4, 4);
    a.drain();
    attack(&mut actor, 2, 4, 4);

    let Some(ServerMessage::CombatBoosted { result, game }) = a.last() else {
        panic!("expected boosted result");
    };
    assert_eq!(result.attacker, Role::PlayerB);
    assert_eq!(result.damage, 5);
    assert_eq!(result.defender_hp, 5);
    assert_eq!(game.turn, Role::PlayerA);
    assert!(!actor.state().unit(Role::PlayerB).unwrap().boosted);
    assert!(actor.state().combat().is_idle());
    assert!(!a.messages().iter().any(|m| matches!(m, ServerMessage::CombatStart { .. })));
    assert!(errors(&b).is_empty());
}

// ============================================================================
// POWER-UPS
// ============================================================================

#[test]
fn test_power_ups_capped_and_board_consistent() {
    let mut actor = actor_with(&ServerConfig::default(), ScriptedDice::new().always_spawn(true));
    join(&mut actor, 1);
    join(&mut actor, 2);

    let a_path = [(2, 2), (0, 0)];
    let b_path = [(6, 6), (8, 8)];
    for turn in 0..20 {
        let (ax, ay) = a_path[turn % 2];
        let (bx, by) = b_path[turn % 2];
        move_to(&mut actor, 1, ax, ay);
        assert_board_consistent(&actor);
        move_to(&mut actor, 2, bx, by);
        assert_board_consistent(&actor);
    }
    assert!(actor.state().power_ups().len() <= 3);
}

#[test]
fn test_heal_clamped_at_max() {
    // Heal lands on (1,1) after A's first move: free index 10 with A on (0,2).
    let dice = ScriptedDice::new().with_chances([true]).with_picks([10]).with_coins([true]);
    let mut actor = actor_with(&ServerConfig::default(), dice);
    join(&mut actor, 1);
    let b = join(&mut actor, 2);

    move_to(&mut actor, 1, 0, 2);
    let heal = actor.state().power_ups()[0];
    assert_eq!(heal.kind, PowerUpKind::Heal);
    assert_eq!(heal.position, Coord::new(1, 1));

    move_to(&mut actor, 2, 8, 7);
    b.drain();
    move_to(&mut actor, 1, 1, 1);
    assert_eq!(actor.state().unit(Role::PlayerA).unwrap().hp, 10);
    assert!(actor.state().power_ups().is_empty());

    let seen = b.drain();
    assert_eq!(seen[0], ServerMessage::system("player_a collected a heal"));
    assert!(matches!(seen[1], ServerMessage::State { .. }));
}

// ============================================================================
// RESET
// ============================================================================

#[test]
fn test_reset_swaps_first_mover() {
    let mut actor = actor_with(&ServerConfig::default(), ScriptedDice::new());
    let first = join(&mut actor, 1);
    let second = join(&mut actor, 2);
    move_to(&mut actor, 1, 2, 2);

    act(&mut actor, Action::Reset { id: ConnectionId(1) });
    assert_eq!(assigned(&first), Some(Role::PlayerB));
    assert_eq!(assigned(&second), Some(Role::PlayerA));
    assert_eq!(actor.state().turn(), Role::PlayerA);
    assert_eq!(actor.state().unit(Role::PlayerA).unwrap().position, Coord::new(0, 0));
    assert!(matches!(second.last(), Some(ServerMessage::State { .. })));

    first.drain();
    move_to(&mut actor, 1, 7, 7);
    assert_eq!(errors(&first), vec!["not your turn".to_string()]);
    move_to(&mut actor, 2, 1, 1);
    assert_eq!(actor.state().turn(), Role::PlayerB);

    act(&mut actor, Action::Reset { id: ConnectionId(2) });
    assert_eq!(assigned(&first), Some(Role::PlayerA));
    assert_eq!(assigned(&second), Some(Role::PlayerB));
}

#[test]
fn test_reset_clears_combat_and_winner() {
    let config = ServerConfig {
        rules: GameRules { max_hp: 1, ..GameRules::default() },
        ..ServerConfig::default()
    };
    let (mut actor, _a, _b) = adjacent_duel(&config, ScriptedDice::new().with_rolls([2, 1]));
    attack(&mut actor, 2, 4, 4);
    roll(&mut actor, 2);
    roll(&mut actor, 1);
    assert_eq!(actor.state().winner(), Some(Role::PlayerB));

    act(&mut actor, Action::Reset { id: ConnectionId(1) });
    let state = actor.state();
    assert_eq!(state.winner(), None);
    assert!(state.combat().is_idle());
    assert!(state.power_ups().is_empty());
    assert_eq!(state.unit(Role::PlayerA).unwrap().hp, 1);
    assert_board_consistent(&actor);
}

#[test]
fn test_reset_promotes_waiting_spectator() {
    let mut actor = actor_with(&ServerConfig::default(), ScriptedDice::new());
    join(&mut actor, 1);
    let b = join(&mut actor, 2);
    let s = join(&mut actor, 3);
    act(&mut actor, Action::Leave { id: ConnectionId(1) });

    act(&mut actor, Action::Reset { id: ConnectionId(3) });
    assert_eq!(assigned(&b), Some(Role::PlayerB));
    assert_eq!(assigned(&s), Some(Role::PlayerA));
    assert_eq!(actor.state().seated(Role::PlayerA), Some(ConnectionId(3)));

    move_to(&mut actor, 3, 1, 1);
    assert!(errors(&s).is_empty());
    assert_eq!(actor.state().turn(), Role::PlayerB);
}

#[test]
fn test_reset_keeps_lone_player_first() {
    let mut actor = actor_with(&ServerConfig::default(), ScriptedDice::new());
    let a = join(&mut actor, 1);
    join(&mut actor, 2);
    act(&mut actor, Action::Leave { id: ConnectionId(2) });

    act(&mut actor, Action::Reset { id: ConnectionId(1) });
    assert_eq!(assigned(&a), Some(Role::PlayerA));
    assert_eq!(actor.state().seated(Role::PlayerA), Some(ConnectionId(1)));
    assert_eq!(actor.state().seated(Role::PlayerB), None);
    assert_eq!(actor.state().turn(), Role::PlayerA);

    move_to(&mut actor, 1, 1, 1);
    assert!(errors(&a).is_empty());
    assert_eq!(actor.state().unit(Role::PlayerA).unwrap().position, Coord::new(1, 1));
}

// ============================================================================
// CHAT
// ============================================================================

#[test]
fn test_chat_is_clipped_and_empty_dropped() {
    let mut actor = actor_with(&ServerConfig::default(), ScriptedDice::new());
    let a = join(&mut actor, 1);
    join(&mut actor, 2);
    let s = join(&mut actor, 3);
    a.drain();

    act(&mut actor, Action::Chat { id: ConnectionId(3), text: "x".repeat(MAX_CHAT_LEN + 50) });
    act(&mut actor, Action::Chat { id: ConnectionId(3), text: "   ".into() });

    let lines = a.drain();
    assert_eq!(lines.len(), 1);
    let ServerMessage::Chat { from, name, message } = &lines[0] else {
        panic!("expected chat");
    };
    assert_eq!(*from, ChatFrom::Spectator);
    assert_eq!(*name, None);
    assert_eq!(message.chars().count(), MAX_CHAT_LEN);
    assert!(errors(&s).is_empty());
}

#[test]
fn test_set_name_tags_chat() {
    let mut actor = actor_with(&ServerConfig::default(), ScriptedDice::new());
    let a = join(&mut actor, 1);
    a.drain();

    act(&mut actor, Action::SetName { id: ConnectionId(1), name: "a".repeat(MAX_NAME_LEN + 5) });
    let long_name = "a".repeat(MAX_NAME_LEN);
    assert_eq!(
        a.last(),
        Some(ServerMessage::system(format!("player_a is now known as {long_name} (player_a)")))
    );

    act(&mut actor, Action::SetName { id: ConnectionId(1), name: " ada ".into() });
    act(&mut actor, Action::Chat { id: ConnectionId(1), text: "gl hf".into() });
    assert_eq!(
        a.last(),
        Some(ServerMessage::Chat {
            from: ChatFrom::PlayerA,
            name: Some("ada".into()),
            message: "gl hf".into(),
        })
    );
}

// ============================================================================
// THREADED ACTOR
// ============================================================================

#[test]
fn test_spawned_actor_processes_in_order() {
    let config = ServerConfig::default();
    let handle = spawn_actor(&config, ScriptedDice::new()).unwrap();
    let sender = handle.sender();

    let a = RecordingSink::new();
    let b = RecordingSink::new();
    let a_id = sender.connect(Box::new(a.clone())).unwrap();
    let b_id = sender.connect(Box::new(b.clone())).unwrap();
    assert_ne!(a_id, b_id);

    assert!(sender.send(Action::Move { id: a_id, to: Coord::new(1, 1) }));
    assert!(sender.send(Action::Move { id: b_id, to: Coord::new(7, 7) }));

    let stats = handle.shutdown().unwrap();
    assert_eq!(stats.processed, 4);
    assert_eq!(stats.rejected, 0);

    let Some(ServerMessage::State { game }) = b.last() else {
        panic!("expected final state");
    };
    assert_eq!(game.turn, Role::PlayerA);
    assert_eq!(game.grid[1][1], Some(Role::PlayerA));
    assert_eq!(game.grid[7][7], Some(Role::PlayerB));
    assert_eq!(game.grid.len(), GRID_SIZE);
    assert!(a.is_closed());
    assert!(!sender.send(Action::Roll { id: a_id }));
}
