//! # Combat State Machine
//!
//! Commit-then-reveal dice combat between the two players.
//!
//! ## States
//!
//! - **Idle**: no combat open. Moves and attacks are legal.
//! - **AwaitingAttackerRoll**: dice are rolled and the outcome decided, but
//!   nobody has seen them. Only the attacker may reveal.
//! - **AwaitingDefenderRoll**: attacker's die is public. Only the defender
//!   may reveal, which resolves the combat and returns to Idle.
//!
//! ```text
//!            attack (no boost)          attacker rolls
//!   Idle ─────────────────────▶ AwaitingAttackerRoll ──────────▶ AwaitingDefenderRoll
//!    ▲                                                                │
//!    └────────────────────── defender rolls (resolved) ──────────────┘
//! ```
//!
//! The outcome is fixed when the record is created. Rolling only reveals it,
//! so a client can never re-roll by reconnecting or spamming.

use gridduel_shared::{CombatView, Role};

use crate::error::{GameError, GameResult};

/// The decided-but-hidden result of one attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatRecord {
    /// Attacking role.
    pub attacker: Role,
    /// Defending role.
    pub defender: Role,
    /// Attacker's die.
    pub attacker_roll: u32,
    /// Defender's die.
    pub defender_roll: u32,
    /// Attacker has revealed.
    pub attacker_rolled: bool,
    /// Defender has revealed.
    pub defender_rolled: bool,
    /// Side that wins the exchange.
    pub winner: Role,
    /// Side that takes the damage.
    pub loser: Role,
    /// Damage dealt to the loser.
    pub damage: u32,
}

impl CombatRecord {
    /// Decides a combat from two dice.
    ///
    /// Higher die wins and ties go to the attacker. The loser takes the
    /// difference, never less than 1.
    #[must_use]
    pub fn decide(attacker: Role, defender: Role, attacker_roll: u32, defender_roll: u32) -> Self {
        let (winner, loser) = if attacker_roll >= defender_roll {
            (attacker, defender)
        } else {
            (defender, attacker)
        };
        Self {
            attacker,
            defender,
            attacker_roll,
            defender_roll,
            attacker_rolled: false,
            defender_rolled: false,
            winner,
            loser,
            damage: attacker_roll.abs_diff(defender_roll).max(1),
        }
    }

    /// Attacker's die if already revealed.
    #[must_use]
    pub const fn revealed_attacker_roll(&self) -> Option<u32> {
        if self.attacker_rolled {
            Some(self.attacker_roll)
        } else {
            None
        }
    }

    /// Public view, without dice.
    #[must_use]
    pub const fn view(&self) -> CombatView {
        CombatView {
            attacker: self.attacker,
            defender: self.defender,
            attacker_rolled: self.attacker_rolled,
            defender_rolled: self.defender_rolled,
        }
    }

    fn involves(&self, role: Role) -> bool {
        role == self.attacker || role == self.defender
    }
}

/// Stored phase of the machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CombatPhase {
    /// No combat open.
    #[default]
    Idle,
    /// Waiting for the attacker to reveal.
    AwaitingAttackerRoll(CombatRecord),
    /// Waiting for the defender to reveal.
    AwaitingDefenderRoll(CombatRecord),
}

/// What a roll did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollOutcome {
    /// The attacker revealed; combat stays open.
    AttackerRevealed(CombatRecord),
    /// The defender revealed; combat is over and must be applied.
    Resolved(CombatRecord),
    /// The requester had already revealed. Nothing changed.
    Duplicate,
}

/// At most one open combat, owned by the actor.
#[derive(Clone, Debug, Default)]
pub struct CombatMachine {
    phase: CombatPhase,
}

impl CombatMachine {
    /// Creates an idle machine.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: CombatPhase::Idle,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> &CombatPhase {
        &self.phase
    }

    /// Returns true when no combat is open.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.phase, CombatPhase::Idle)
    }

    /// The open combat, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&CombatRecord> {
        match &self.phase {
            CombatPhase::Idle => None,
            CombatPhase::AwaitingAttackerRoll(record) | CombatPhase::AwaitingDefenderRoll(record) => {
                Some(record)
            }
        }
    }

    /// Opens a combat.
    ///
    /// # Errors
    ///
    /// [`GameError::CombatPending`] if one is already open.
    pub fn begin(&mut self, record: CombatRecord) -> GameResult<()> {
        if !self.is_idle() {
            return Err(GameError::CombatPending);
        }
        self.phase = CombatPhase::AwaitingAttackerRoll(record);
        Ok(())
    }

    /// Reveals `role`'s die.
    ///
    /// # Errors
    ///
    /// - [`GameError::NoCombat`] when idle.
    /// - [`GameError::NotParticipant`] when `role` is not in the combat.
    /// - [`GameError::AttackerRollsFirst`] when the defender reveals early.
    pub fn roll(&mut self, role: Role) -> GameResult<RollOutcome> {
        match self.phase {
            CombatPhase::Idle => Err(GameError::NoCombat),
            CombatPhase::AwaitingAttackerRoll(mut record) => {
                if !record.involves(role) {
                    return Err(GameError::NotParticipant);
                }
                if role != record.attacker {
                    return Err(GameError::AttackerRollsFirst);
                }
                record.attacker_rolled = true;
                self.phase = CombatPhase::AwaitingDefenderRoll(record);
                Ok(RollOutcome::AttackerRevealed(record))
            }
            CombatPhase::AwaitingDefenderRoll(mut record) => {
                if !record.involves(role) {
                    return Err(GameError::NotParticipant);
                }
                if role == record.attacker {
                    return Ok(RollOutcome::Duplicate);
                }
                record.defender_rolled = true;
                self.phase = CombatPhase::Idle;
                Ok(RollOutcome::Resolved(record))
            }
        }
    }

    /// Drops any open combat. Used by reset.
    pub fn clear(&mut self) {
        self.phase = CombatPhase::Idle;
    }
}
