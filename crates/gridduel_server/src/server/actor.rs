//! # Game Actor
//!
//! The single owner of game state. Connection tasks never touch the board;
//! they enqueue [`Action`]s and the actor applies them one at a time.
//!
//! ## Per-action order
//!
//! ```text
//! 1. Look up the requester's role
//! 2. Validate against the rules (reject privately on failure)
//! 3. Mutate state
//! 4. End the turn if it ended (flip, spawn roll)
//! 5. Broadcast the result
//! ```
//!
//! Rejections never change state and are only seen by the requester.

use std::time::Instant;

use crossbeam_channel::Receiver;

use gridduel_shared::{
    BoostedReport, CombatReport, Coord, PowerUpKind, Role, ServerMessage, MAX_CHAT_LEN, MAX_NAME_LEN,
};

use super::action::Action;
use super::connection::{ClientConnection, ConnectionId, Roster};
use super::stats::ActorStats;
use crate::config::ServerConfig;
use crate::error::{GameError, GameResult};
use crate::game::{CombatRecord, GameState, RollOutcome};
use crate::traits::{ClientSink, Dice};

/// Trims and cuts user text to at most `max` characters.
fn clip(text: &str, max: usize) -> String {
    text.trim().chars().take(max).collect::<String>().trim_end().to_owned()
}

fn rolled_message(record: &CombatRecord) -> ServerMessage {
    ServerMessage::CombatRolled {
        attacker: record.attacker,
        defender: record.defender,
        attacker_rolled: record.attacker_rolled,
        defender_rolled: record.defender_rolled,
        attacker_roll: record.revealed_attacker_roll(),
    }
}

/// The game actor.
pub struct GameActor<D: Dice> {
    state: GameState,
    roster: Roster,
    dice: D,
    stats: ActorStats,
}

impl<D: Dice> GameActor<D> {
    /// Creates an actor with a fresh board and nobody connected.
    #[must_use]
    pub fn new(config: &ServerConfig, dice: D) -> Self {
        Self {
            state: GameState::new(config.rules.clone()),
            roster: Roster::new(config.max_clients),
            dice,
            stats: ActorStats::new(),
        }
    }

    /// Game state, read-only.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Connected clients, read-only.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Timing statistics.
    #[must_use]
    pub const fn stats(&self) -> ActorStats {
        self.stats
    }

    /// Drains the inbox until shutdown or until every sender is gone.
    pub fn run(mut self, inbox: &Receiver<Action>) -> ActorStats {
        tracing::info!("Game actor started (capacity {})", self.roster.capacity());
        while let Ok(action) = inbox.recv() {
            if !self.process(action) {
                break;
            }
        }
        for client in self.roster.iter_mut() {
            client.close();
        }
        tracing::info!(
            "Game actor stopped: {} actions, {} rejected, avg {}us, max {}us",
            self.stats.processed,
            self.stats.rejected,
            self.stats.avg_action_us,
            self.stats.max_action_us
        );
        self.stats
    }

    /// Applies one action. Returns false on shutdown.
    pub fn process(&mut self, action: Action) -> bool {
        let started = Instant::now();
        let requester = action.client();
        let kind = action.kind();

        let result = match action {
            Action::Shutdown => {
                tracing::info!("Shutdown requested");
                return false;
            }
            Action::Join { id, sink } => {
                self.join(id, sink);
                Ok(())
            }
            Action::Leave { id } => {
                self.leave(id);
                Ok(())
            }
            Action::Move { id, to } => self.handle_move(id, to),
            Action::Attack { id, target } => self.handle_attack(id, target),
            Action::Roll { id } => self.handle_roll(id),
            Action::Reset { id } => self.handle_reset(id),
            Action::Chat { id, text } => self.handle_chat(id, &text),
            Action::SetName { id, name } => self.handle_set_name(id, &name),
        };

        let rejected = result.is_err();
        if let Err(err) = result {
            tracing::debug!("Rejected {} from {:?}: {}", kind, requester, err);
            if let Some(id) = requester {
                self.roster.send(id, &ServerMessage::error(err.to_string()));
            }
        }
        self.stats.record(started.elapsed(), rejected);
        true
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn role_of(&self, id: ConnectionId) -> GameResult<Role> {
        self.roster.get(id).map(|c| c.role).ok_or(GameError::UnknownClient)
    }

    fn broadcast_state(&mut self) {
        let message = ServerMessage::State {
            game: self.state.snapshot(),
        };
        self.roster.broadcast(&message);
    }

    fn finish_turn(&mut self) {
        if let Some(power_up) = self.state.finish_turn(&mut self.dice) {
            tracing::debug!(
                "Spawned {:?} at ({}, {})",
                power_up.kind,
                power_up.position.x,
                power_up.position.y
            );
        }
    }

    // ========================================================================
    // ROSTER
    // ========================================================================

    fn join(&mut self, id: ConnectionId, sink: Box<dyn ClientSink>) {
        if self.roster.contains(id) {
            tracing::warn!("Duplicate join for {}, ignoring", id);
            return;
        }
        if self.roster.is_full() {
            let err = GameError::RosterFull {
                capacity: self.roster.capacity(),
            };
            tracing::warn!("Rejecting {}: {}", id, err);
            if let Err(send_err) = sink.deliver(&ServerMessage::error(err.to_string())) {
                tracing::debug!("Could not tell {} it was rejected: {}", id, send_err);
            }
            sink.close();
            return;
        }

        let role = self.state.vacant_role().unwrap_or(Role::Spectator);
        self.state.seat(role, id);

        let mut client = ClientConnection::new(id, role, sink);
        client.send(&ServerMessage::Assigned { role });
        client.send(&ServerMessage::State {
            game: self.state.snapshot(),
        });
        self.roster.add(client);

        tracing::info!("Client connected: {} as {} ({} online)", id, role, self.roster.len());
        self.roster.broadcast(&ServerMessage::system(format!("{role} joined")));
    }

    fn leave(&mut self, id: ConnectionId) {
        let Some(client) = self.roster.remove(id) else {
            tracing::debug!("Leave for unknown client {}", id);
            return;
        };
        self.state.unseat(id);

        tracing::info!("Client disconnected: {} ({} online)", id, self.roster.len());
        self.roster.broadcast(&ServerMessage::system(format!("{} left", client.label())));
    }

    // ========================================================================
    // TURN ACTIONS
    // ========================================================================

    fn handle_move(&mut self, id: ConnectionId, to: Coord) -> GameResult<()> {
        let role = self.role_of(id)?;
        if let Some(power_up) = self.state.move_unit(role, to)? {
            tracing::debug!("{} collected {:?}", role, power_up.kind);
            let label = self.roster.get(id).map_or_else(|| role.to_string(), ClientConnection::label);
            let item = match power_up.kind {
                PowerUpKind::Heal => "a heal",
                PowerUpKind::AttackBoost => "an attack boost",
            };
            self.roster.broadcast(&ServerMessage::system(format!("{label} collected {item}")));
        }
        self.finish_turn();
        self.broadcast_state();
        Ok(())
    }

    fn handle_attack(&mut self, id: ConnectionId, target: Coord) -> GameResult<()> {
        let role = self.role_of(id)?;
        let defender = self.state.check_attack(role, target)?;

        if self.state.take_boost(role) {
            let damage = self.state.rules().boosted_damage;
            let defender_hp = self.state.apply_damage(defender, damage);
            self.finish_turn();
            let message = ServerMessage::CombatBoosted {
                result: BoostedReport {
                    attacker: role,
                    defender,
                    damage,
                    defender_hp,
                    eliminated: defender_hp == 0,
                },
                game: self.state.snapshot(),
            };
            self.roster.broadcast(&message);
            return Ok(());
        }

        let sides = self.state.rules().die_sides;
        let attacker_roll = self.dice.roll(sides);
        let defender_roll = self.dice.roll(sides);
        let record = CombatRecord::decide(role, defender, attacker_roll, defender_roll);
        self.state.combat_mut().begin(record)?;

        tracing::debug!("Combat opened: {} attacks {}", role, defender);
        self.roster.broadcast(&ServerMessage::CombatStart {
            attacker: role,
            defender,
            attacker_rolled: false,
            defender_rolled: false,
        });
        Ok(())
    }

    fn handle_roll(&mut self, id: ConnectionId) -> GameResult<()> {
        let role = self.role_of(id)?;
        match self.state.combat_mut().roll(role)? {
            RollOutcome::Duplicate => {
                tracing::debug!("Duplicate roll from {}", role);
            }
            RollOutcome::AttackerRevealed(record) => {
                self.roster.broadcast(&rolled_message(&record));
            }
            RollOutcome::Resolved(record) => {
                self.roster.broadcast(&rolled_message(&record));
                let loser_hp = self.state.apply_damage(record.loser, record.damage);
                self.finish_turn();
                let message = ServerMessage::Combat {
                    result: CombatReport {
                        attacker: record.attacker,
                        defender: record.defender,
                        attacker_roll: record.attacker_roll,
                        defender_roll: record.defender_roll,
                        winner: record.winner,
                        damage: record.damage,
                        loser_hp,
                        eliminated: loser_hp == 0,
                    },
                    game: self.state.snapshot(),
                };
                self.roster.broadcast(&message);
            }
        }
        Ok(())
    }

    // ========================================================================
    // SESSION ACTIONS
    // ========================================================================

    fn handle_reset(&mut self, id: ConnectionId) -> GameResult<()> {
        self.role_of(id)?;
        self.state.reset_board();
        if !self.state.swap_seats() {
            tracing::debug!("Reset with an empty seat, roles kept");
        }

        for client in self.roster.iter_mut() {
            client.role = self.state.role_of_seat(client.id);
        }
        while let Some(role) = self.state.vacant_role() {
            let Some(next) = self.roster.first_spectator() else {
                break;
            };
            self.state.seat(role, next);
            if let Some(client) = self.roster.get_mut(next) {
                client.role = role;
            }
        }
        for client in self.roster.iter_mut() {
            let role = client.role;
            client.send(&ServerMessage::Assigned { role });
        }

        tracing::info!(
            "Game reset by {}: player_a={:?} player_b={:?}",
            id,
            self.state.seated(Role::PlayerA),
            self.state.seated(Role::PlayerB)
        );
        self.broadcast_state();
        Ok(())
    }

    fn handle_chat(&mut self, id: ConnectionId, text: &str) -> GameResult<()> {
        let client = self.roster.get(id).ok_or(GameError::UnknownClient)?;
        let message = clip(text, MAX_CHAT_LEN);
        if message.is_empty() {
            return Ok(());
        }
        let line = ServerMessage::Chat {
            from: client.role.into(),
            name: client.name.clone(),
            message,
        };
        self.roster.broadcast(&line);
        Ok(())
    }

    fn handle_set_name(&mut self, id: ConnectionId, name: &str) -> GameResult<()> {
        let client = self.roster.get_mut(id).ok_or(GameError::UnknownClient)?;
        let name = clip(name, MAX_NAME_LEN);
        if name.is_empty() {
            return Ok(());
        }
        let before = client.label();
        client.name = Some(name);
        let notice = format!("{before} is now known as {}", client.label());
        self.roster.broadcast(&ServerMessage::system(notice));
        Ok(())
    }
}
