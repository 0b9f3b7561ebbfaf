//! # Authoritative Game State
//!
//! Owned by the actor and never shared. Every mutation goes through the
//! methods below, which keep these true after each action:
//!
//! - each living unit's cell holds its owner's marker, and no other cell does
//! - at most [`GameRules::max_power_ups`] power-ups, none under a unit
//! - at most one combat open
//! - once `winner` is set, only a reset changes the board

use gridduel_shared::constants::{ATTACK_RANGE, MOVE_RANGE, PLAYER_A_SPAWN, PLAYER_B_SPAWN};
use gridduel_shared::{Coord, GameSnapshot, Role, PLAYERS};

use super::combat::CombatMachine;
use super::grid::Grid;
use super::spawner::{collect_at, Spawner};
use super::unit::{PowerUp, Unit};
use crate::config::GameRules;
use crate::error::{GameError, GameResult};
use crate::server::connection::ConnectionId;
use crate::traits::Dice;

/// Slot index of a player role. Spectators have none.
#[must_use]
pub const fn slot_index(role: Role) -> Option<usize> {
    match role {
        Role::PlayerA => Some(0),
        Role::PlayerB => Some(1),
        Role::Spectator => None,
    }
}

const fn spawn_point(role: Role) -> Coord {
    match role {
        Role::PlayerB => PLAYER_B_SPAWN,
        Role::PlayerA | Role::Spectator => PLAYER_A_SPAWN,
    }
}

fn fresh_units(max_hp: u32) -> [Unit; 2] {
    PLAYERS.map(|role| Unit::new(role, spawn_point(role), max_hp))
}

/// Board, units, power-ups, turn, winner, combat and player slots.
pub struct GameState {
    grid: Grid,
    units: [Unit; 2],
    power_ups: Vec<PowerUp>,
    turn: Role,
    winner: Option<Role>,
    combat: CombatMachine,
    players: [Option<ConnectionId>; 2],
    spawner: Spawner,
    rules: GameRules,
}

impl GameState {
    /// Fresh board with both units at their spawns and no players seated.
    #[must_use]
    pub fn new(rules: GameRules) -> Self {
        let mut state = Self {
            grid: Grid::new(),
            units: fresh_units(rules.max_hp),
            power_ups: Vec::with_capacity(rules.max_power_ups),
            turn: Role::PlayerA,
            winner: None,
            combat: CombatMachine::new(),
            players: [None; 2],
            spawner: Spawner::new(rules.spawn_chance, rules.max_power_ups),
            rules,
        };
        state.place_units();
        state
    }

    fn place_units(&mut self) {
        self.grid.clear_all();
        for unit in &self.units {
            if unit.is_alive() {
                self.grid.set(unit.position, unit.owner);
            }
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Gameplay numbers in force.
    #[must_use]
    pub const fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Role whose turn it is.
    #[must_use]
    pub const fn turn(&self) -> Role {
        self.turn
    }

    /// Winner, once decided.
    #[must_use]
    pub const fn winner(&self) -> Option<Role> {
        self.winner
    }

    /// Cell occupancy.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// A player's unit. `None` for spectators.
    #[must_use]
    pub fn unit(&self, role: Role) -> Option<&Unit> {
        slot_index(role).map(|i| &self.units[i])
    }

    /// Active power-ups.
    #[must_use]
    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    /// Combat machine.
    #[must_use]
    pub const fn combat(&self) -> &CombatMachine {
        &self.combat
    }

    /// Combat machine, mutably.
    pub fn combat_mut(&mut self) -> &mut CombatMachine {
        &mut self.combat
    }

    // ========================================================================
    // PLAYER SLOTS
    // ========================================================================

    /// Connection seated in a player slot.
    #[must_use]
    pub fn seated(&self, role: Role) -> Option<ConnectionId> {
        slot_index(role).and_then(|i| self.players[i])
    }

    /// First vacant player role, A before B.
    #[must_use]
    pub fn vacant_role(&self) -> Option<Role> {
        PLAYERS.into_iter().find(|&role| self.seated(role).is_none())
    }

    /// Seats a connection. Spectator roles are ignored.
    pub fn seat(&mut self, role: Role, id: ConnectionId) {
        if let Some(i) = slot_index(role) {
            self.players[i] = Some(id);
        }
    }

    /// Vacates whichever slot `id` holds. The unit stays on the board.
    pub fn unseat(&mut self, id: ConnectionId) {
        for slot in &mut self.players {
            if *slot == Some(id) {
                *slot = None;
            }
        }
    }

    /// Exchanges the occupants of the two player slots. Only swaps when both
    /// are seated; returns whether it did.
    pub fn swap_seats(&mut self) -> bool {
        if self.players.iter().all(Option::is_some) {
            self.players.swap(0, 1);
            true
        } else {
            false
        }
    }

    /// Role of the slot `id` is seated in, or spectator.
    #[must_use]
    pub fn role_of_seat(&self, id: ConnectionId) -> Role {
        PLAYERS
            .into_iter()
            .find(|&role| self.seated(role) == Some(id))
            .unwrap_or(Role::Spectator)
    }

    // ========================================================================
    // RULES
    // ========================================================================

    /// Checks that `role` may take a turn action right now.
    ///
    /// # Errors
    ///
    /// Spectators, a finished game, an open combat and someone else's turn
    /// are rejected, in that order.
    pub fn check_can_act(&self, role: Role, verb: &'static str) -> GameResult<()> {
        if !role.is_player() {
            return Err(GameError::SpectatorAction(verb));
        }
        if let Some(winner) = self.winner {
            return Err(GameError::GameOver { winner });
        }
        if !self.combat.is_idle() {
            return Err(GameError::CombatPending);
        }
        if self.turn != role {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    /// Moves `role`'s unit and collects any power-up at the destination.
    ///
    /// Does not end the turn.
    ///
    /// # Errors
    ///
    /// Anything [`GameState::check_can_act`] rejects, plus an off-board,
    /// out-of-range, zero-length or occupied destination.
    pub fn move_unit(&mut self, role: Role, to: Coord) -> GameResult<Option<PowerUp>> {
        self.check_can_act(role, "move")?;
        let index = slot_index(role).ok_or(GameError::SpectatorAction("move"))?;
        let unit = self.units[index];
        if !unit.is_alive() {
            return Err(GameError::UnitEliminated);
        }
        if !to.in_bounds() {
            return Err(GameError::OutOfBounds { x: to.x, y: to.y });
        }
        let distance = unit.position.chebyshev(to);
        if distance == 0 {
            return Err(GameError::NoMovement);
        }
        if distance > MOVE_RANGE {
            return Err(GameError::TooFar { distance, max: MOVE_RANGE });
        }
        if !self.grid.is_empty(to) {
            return Err(GameError::CellOccupied);
        }

        self.grid.clear(unit.position);
        self.grid.set(to, role);
        let unit = &mut self.units[index];
        unit.position = to;

        let collected = collect_at(&mut self.power_ups, to);
        if let Some(power_up) = collected {
            power_up.apply(unit, self.rules.heal_amount);
        }
        Ok(collected)
    }

    /// Validates an attack by `role` on `target` and returns the defender.
    ///
    /// # Errors
    ///
    /// Anything [`GameState::check_can_act`] rejects, plus an off-board
    /// target, a target that is not the living opponent, or one out of range.
    pub fn check_attack(&self, role: Role, target: Coord) -> GameResult<Role> {
        self.check_can_act(role, "attack")?;
        if !target.in_bounds() {
            return Err(GameError::OutOfBounds { x: target.x, y: target.y });
        }
        let defender = role.opponent().ok_or(GameError::SpectatorAction("attack"))?;
        let (Some(attacker_unit), Some(defender_unit)) = (self.unit(role), self.unit(defender)) else {
            return Err(GameError::InvalidTarget);
        };
        if !attacker_unit.is_alive() {
            return Err(GameError::UnitEliminated);
        }
        if !defender_unit.is_alive() || defender_unit.position != target {
            return Err(GameError::InvalidTarget);
        }
        let distance = attacker_unit.position.chebyshev(target);
        if distance > ATTACK_RANGE {
            return Err(GameError::OutOfRange { distance, max: ATTACK_RANGE });
        }
        Ok(defender)
    }

    /// Consumes `role`'s attack boost. Returns whether one was held.
    pub fn take_boost(&mut self, role: Role) -> bool {
        slot_index(role).is_some_and(|i| std::mem::take(&mut self.units[i].boosted))
    }

    /// Damages `role`'s unit. Elimination clears its marker and crowns the
    /// opponent. Returns the unit's new HP.
    pub fn apply_damage(&mut self, role: Role, amount: u32) -> u32 {
        let Some(index) = slot_index(role) else {
            return 0;
        };
        let unit = &mut self.units[index];
        let hp = unit.take_damage(amount);
        if hp == 0 {
            self.grid.clear(unit.position);
            self.winner = role.opponent();
            tracing::info!("{} eliminated, game over", role);
        }
        hp
    }

    /// Ends the current turn: flips the mover and runs one spawn roll.
    ///
    /// Does nothing once the game is decided. Returns a spawned power-up.
    pub fn finish_turn(&mut self, dice: &mut dyn Dice) -> Option<PowerUp> {
        if self.winner.is_some() {
            return None;
        }
        self.turn = self.turn.opponent().unwrap_or(Role::PlayerA);
        self.spawner.roll(&self.grid, &mut self.power_ups, dice)
    }

    /// New round on the same board: full-HP units at their spawns, no
    /// power-ups, no combat, no winner, first player to move.
    ///
    /// Player slots are untouched.
    pub fn reset_board(&mut self) {
        self.units = fresh_units(self.rules.max_hp);
        self.power_ups.clear();
        self.combat.clear();
        self.winner = None;
        self.turn = Role::PlayerA;
        self.place_units();
    }

    /// Client view. Dice of an open combat are never included.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid.rows(),
            turn: self.turn,
            winner: self.winner,
            units: self.units.iter().map(Unit::view).collect(),
            power_ups: self.power_ups.iter().map(PowerUp::view).collect(),
            combat: self.combat.pending().map(|record| record.view()),
        }
    }
}
