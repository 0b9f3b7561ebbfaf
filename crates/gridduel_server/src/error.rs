//! # Error Types
//!
//! Everything the actor can refuse, and everything that can go wrong while
//! loading configuration.
//!
//! A [`GameError`] never stops the actor. Its `Display` text is what the
//! requesting client sees in its private `error` message.

use thiserror::Error;

use gridduel_shared::Role;

/// Reasons the actor rejects a client action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Roster already holds the maximum number of clients.
    #[error("server full: {capacity} clients already connected")]
    RosterFull {
        /// Configured roster capacity.
        capacity: usize,
    },

    /// Action came from a connection the actor does not know.
    #[error("unknown client")]
    UnknownClient,

    /// Spectators may only chat and rename.
    #[error("spectators cannot {0}")]
    SpectatorAction(&'static str),

    /// Requester does not hold the turn.
    #[error("not your turn")]
    NotYourTurn,

    /// A winner has already been decided.
    #[error("game is over, {winner} won")]
    GameOver {
        /// Winning role.
        winner: Role,
    },

    /// Coordinates fall outside the board.
    #[error("position ({x}, {y}) is off the board")]
    OutOfBounds {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
    },

    /// Destination is the unit's own cell.
    #[error("must move at least one cell")]
    NoMovement,

    /// Destination is beyond movement range.
    #[error("too far: {distance} cells, max {max}")]
    TooFar {
        /// Chebyshev distance requested.
        distance: u32,
        /// Allowed range.
        max: u32,
    },

    /// Destination already holds a unit.
    #[error("cell already occupied")]
    CellOccupied,

    /// Own unit has been eliminated.
    #[error("your unit has been eliminated")]
    UnitEliminated,

    /// Attack target is not the opponent's cell.
    #[error("no enemy unit at target")]
    InvalidTarget,

    /// Attack target is beyond attack range.
    #[error("target out of range: {distance} cells, max {max}")]
    OutOfRange {
        /// Chebyshev distance to target.
        distance: u32,
        /// Allowed range.
        max: u32,
    },

    /// A combat is already waiting for its rolls.
    #[error("a combat is already in progress")]
    CombatPending,

    /// Roll requested with no combat open.
    #[error("no combat in progress")]
    NoCombat,

    /// Roll requested by someone outside the combat.
    #[error("you are not part of this combat")]
    NotParticipant,

    /// Defender tried to reveal first.
    #[error("attacker must roll first")]
    AttackerRollsFirst,
}

/// Result type for actor operations.
pub type GameResult<T> = Result<T, GameError>;

/// Why an outbound message could not be queued.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// Outbound queue is at capacity. The client is too slow.
    #[error("outbound queue full")]
    Full,

    /// Connection is already gone.
    #[error("connection closed")]
    Closed,
}

/// Errors that can occur while loading server configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// File that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::ServerConfig`].
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
