//! # GRIDDUEL Shared
//!
//! Protocol types used by both the browser client and the server.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on a runtime (`tokio`, `axum`, threads).
//! It describes what goes over the wire, not how.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod coord;
pub mod protocol;
pub mod role;

pub use constants::{GRID_SIZE, MAX_CHAT_LEN, MAX_CLIENTS, MAX_NAME_LEN, SERVER_BIND, SERVER_PORT};
pub use coord::Coord;
pub use protocol::{
    BoostedReport, ChatFrom, ClientMessage, CombatReport, CombatView, GameSnapshot, PowerUpKind,
    PowerUpView, ServerMessage, UnitView,
};
pub use role::{Role, PLAYERS};
