//! Units and power-ups.

use gridduel_shared::{Coord, PowerUpKind, PowerUpView, Role, UnitView};

/// A player's piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unit {
    /// Owning role.
    pub owner: Role,
    /// Current cell.
    pub position: Coord,
    /// Current hit points, always within `0..=max_hp`.
    pub hp: u32,
    /// Maximum hit points.
    pub max_hp: u32,
    /// Holds an unused attack boost.
    pub boosted: bool,
}

impl Unit {
    /// Creates a unit at full health.
    #[must_use]
    pub const fn new(owner: Role, position: Coord, max_hp: u32) -> Self {
        Self {
            owner,
            position,
            hp: max_hp,
            max_hp,
            boosted: false,
        }
    }

    /// Returns true while the unit has hit points left.
    #[inline]
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtracts damage, clamped at zero. Returns the new HP.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.hp = self.hp.saturating_sub(amount);
        self.hp
    }

    /// Adds hit points, clamped at max. Returns the new HP.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp
    }

    /// Client view.
    #[must_use]
    pub const fn view(&self) -> UnitView {
        UnitView {
            owner: self.owner,
            position: self.position,
            hp: self.hp,
            max_hp: self.max_hp,
            boosted: self.boosted,
        }
    }
}

/// A collectible lying on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerUp {
    /// What it grants.
    pub kind: PowerUpKind,
    /// Where it lies.
    pub position: Coord,
}

impl PowerUp {
    /// Applies the effect to a unit.
    pub fn apply(self, unit: &mut Unit, heal_amount: u32) {
        match self.kind {
            PowerUpKind::Heal => {
                unit.heal(heal_amount);
            }
            PowerUpKind::AttackBoost => unit.boosted = true,
        }
    }

    /// Client view.
    #[must_use]
    pub const fn view(&self) -> PowerUpView {
        PowerUpView {
            kind: self.kind,
            position: self.position,
        }
    }
}
