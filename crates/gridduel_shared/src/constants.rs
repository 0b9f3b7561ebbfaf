//! # Game & Network Constants
//!
//! Values both the server and the browser client must agree on.
//!
//! **NOTE:** The browser renders a fixed board. Changing [`GRID_SIZE`]
//! requires a client update.

use crate::coord::Coord;

// =============================================================================
// BOARD
// =============================================================================

/// Width and height of the square board.
pub const GRID_SIZE: usize = 9;

/// Maximum Chebyshev distance a unit may travel in one move.
pub const MOVE_RANGE: u32 = 3;

/// Maximum Chebyshev distance between attacker and target.
pub const ATTACK_RANGE: u32 = 1;

/// Spawn corner of the first player's unit.
pub const PLAYER_A_SPAWN: Coord = Coord::new(0, 0);

/// Spawn corner of the second player's unit.
pub const PLAYER_B_SPAWN: Coord = Coord::new(GRID_SIZE as i32 - 1, GRID_SIZE as i32 - 1);

// =============================================================================
// GAMEPLAY DEFAULTS
// =============================================================================

/// Default maximum hit points of a unit.
pub const MAX_HP: u32 = 10;

/// Default number of faces on a combat die.
pub const DIE_SIDES: u32 = 6;

/// Default damage dealt by a boosted attack.
pub const BOOSTED_DAMAGE: u32 = 5;

/// Default HP restored by a heal power-up.
pub const HEAL_AMOUNT: u32 = 3;

/// Default probability that a power-up spawns after a turn.
pub const SPAWN_CHANCE: f64 = 0.3;

/// Default cap on simultaneously active power-ups.
pub const MAX_POWER_UPS: usize = 3;

// =============================================================================
// SESSION
// =============================================================================

/// Default cap on simultaneously connected clients.
pub const MAX_CLIENTS: usize = 10;

/// Longest chat message, in characters. Longer messages are truncated.
pub const MAX_CHAT_LEN: usize = 200;

/// Longest display name, in characters. Longer names are truncated.
pub const MAX_NAME_LEN: usize = 20;

/// Default server port for browser traffic.
pub const SERVER_PORT: u16 = 8080;

/// Default bind address (all interfaces).
pub const SERVER_BIND: &str = "0.0.0.0:8080";
