//! # Game Rules
//!
//! Pure game logic with no I/O. The actor drives it; nothing here knows
//! about connections beyond an opaque [`ConnectionId`](crate::server::ConnectionId)
//! per player slot.

pub mod combat;
pub mod grid;
pub mod spawner;
pub mod state;
pub mod unit;

pub use combat::{CombatMachine, CombatPhase, CombatRecord, RollOutcome};
pub use grid::Grid;
pub use spawner::Spawner;
pub use state::GameState;
pub use unit::{PowerUp, Unit};
