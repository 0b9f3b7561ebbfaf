//! Power-up spawning.
//!
//! One roll per completed turn. A roll passes the probability gate, checks
//! the cap, then picks a uniformly random cell holding neither a unit nor a
//! power-up. Kind is a fair coin.

use gridduel_shared::{Coord, PowerUpKind};

use super::grid::{Grid, CELL_COUNT};
use super::unit::PowerUp;
use crate::traits::Dice;

/// Spawner settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spawner {
    chance: f64,
    cap: usize,
}

impl Spawner {
    /// Creates a spawner with a gate probability and an active cap.
    #[must_use]
    pub const fn new(chance: f64, cap: usize) -> Self {
        Self { chance, cap }
    }

    /// Runs one spawn roll, pushing the new power-up onto `active`.
    ///
    /// Returns the spawned power-up, or `None` when the gate failed, the cap
    /// is reached or no free cell exists.
    pub fn roll(&self, grid: &Grid, active: &mut Vec<PowerUp>, dice: &mut dyn Dice) -> Option<PowerUp> {
        if !dice.chance(self.chance) || active.len() >= self.cap {
            return None;
        }

        let free: Vec<Coord> = (0..CELL_COUNT)
            .map(Coord::from_index)
            .filter(|&cell| grid.is_empty(cell) && !active.iter().any(|p| p.position == cell))
            .collect();
        if free.is_empty() {
            return None;
        }

        let position = free[dice.pick(free.len())];
        let kind = if dice.coin() {
            PowerUpKind::Heal
        } else {
            PowerUpKind::AttackBoost
        };
        let power_up = PowerUp { kind, position };
        active.push(power_up);
        Some(power_up)
    }
}

/// Removes and returns the power-up at `at`, if any.
pub fn collect_at(active: &mut Vec<PowerUp>, at: Coord) -> Option<PowerUp> {
    let index = active.iter().position(|p| p.position == at)?;
    Some(active.swap_remove(index))
}
