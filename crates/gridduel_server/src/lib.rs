//! # GRIDDUEL Server - The Referee
//!
//! Authoritative server for a two-player duel on a 9×9 board.
//!
//! ## Architecture
//!
//! - **Game**: pure rules (board, units, power-ups, dice combat)
//! - **Server**: the single-threaded actor that owns the game, its inbox and
//!   the roster of connected clients
//! - **Gateway**: WebSocket transport that turns frames into actions
//!
//! ## Security Model
//!
//! ```text
//! CLIENT                           SERVER
//!   |                                 |
//!   |--- Intent: "attack (4, 4)" ---->|
//!   |                                 | <- Actor validates, rolls dice
//!   |<-- combat_start (no dice) ------|
//!   |--- Intent: "roll" ------------->|
//!   |<-- combat_rolled (reveal) ------|
//!   |                                 |
//! ```
//!
//! Dice are rolled and the outcome fixed when the attack is accepted. Clients
//! only ever reveal, so nothing they send can change a result.
//!
//! ## Example
//!
//! ```rust,ignore
//! use gridduel_server::{spawn_actor, ChaChaDice, ServerConfig};
//!
//! let config = ServerConfig::default();
//! let actor = spawn_actor(&config, ChaChaDice::new(config.seed))?;
//! let app = gridduel_server::gateway::router(actor.sender(), config.outbound_buffer);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod game;
pub mod gateway;
pub mod server;
pub mod traits;

pub use config::{GameRules, ServerConfig};
pub use error::{ConfigError, GameError, GameResult, SinkError};
pub use server::{spawn_actor, Action, ActionSender, ActorHandle, ActorStats, ConnectionId, GameActor};
pub use traits::{ChaChaDice, ClientSink, Dice, RecordingSink, ScriptedDice};
