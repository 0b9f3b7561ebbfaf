//! # Actor Inbox
//!
//! Everything that can change game state arrives as an [`Action`] on the
//! actor's queue. Actions are processed strictly one at a time in arrival
//! order.
//!
//! ```text
//! socket open   ──▶ Join  { id, sink }
//! text frame    ──▶ Move | Attack | Roll | Reset | Chat | SetName
//! socket closed ──▶ Leave { id }
//! ctrl-c        ──▶ Shutdown
//! ```

use gridduel_shared::{ClientMessage, Coord};

use super::connection::ConnectionId;
use crate::traits::ClientSink;

/// A request for the game actor.
pub enum Action {
    /// A connection opened.
    Join {
        /// New connection.
        id: ConnectionId,
        /// Its outbound path.
        sink: Box<dyn ClientSink>,
    },
    /// A connection closed.
    Leave {
        /// Closed connection.
        id: ConnectionId,
    },
    /// Move own unit.
    Move {
        /// Requester.
        id: ConnectionId,
        /// Destination.
        to: Coord,
    },
    /// Attack the unit on a cell.
    Attack {
        /// Requester.
        id: ConnectionId,
        /// Target cell.
        target: Coord,
    },
    /// Reveal own die.
    Roll {
        /// Requester.
        id: ConnectionId,
    },
    /// Start a new round.
    Reset {
        /// Requester.
        id: ConnectionId,
    },
    /// Chat line.
    Chat {
        /// Requester.
        id: ConnectionId,
        /// Raw body.
        text: String,
    },
    /// Rename.
    SetName {
        /// Requester.
        id: ConnectionId,
        /// Raw name.
        name: String,
    },
    /// Stop the actor after the actions already queued.
    Shutdown,
}

impl Action {
    /// Turns a decoded client frame into an action.
    #[must_use]
    pub fn from_client(id: ConnectionId, message: ClientMessage) -> Self {
        match message {
            ClientMessage::Move { x, y } => Self::Move { id, to: Coord::new(x, y) },
            ClientMessage::Attack { x, y } => Self::Attack { id, target: Coord::new(x, y) },
            ClientMessage::Roll => Self::Roll { id },
            ClientMessage::Reset => Self::Reset { id },
            ClientMessage::Chat { text } => Self::Chat { id, text },
            ClientMessage::SetName { name } => Self::SetName { id, name },
        }
    }

    /// Connection that sent the action, if any.
    #[must_use]
    pub const fn client(&self) -> Option<ConnectionId> {
        match self {
            Self::Join { id, .. }
            | Self::Leave { id }
            | Self::Move { id, .. }
            | Self::Attack { id, .. }
            | Self::Roll { id }
            | Self::Reset { id }
            | Self::Chat { id, .. }
            | Self::SetName { id, .. } => Some(*id),
            Self::Shutdown => None,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Leave { .. } => "leave",
            Self::Move { .. } => "move",
            Self::Attack { .. } => "attack",
            Self::Roll { .. } => "roll",
            Self::Reset { .. } => "reset",
            Self::Chat { .. } => "chat",
            Self::SetName { .. } => "set_name",
            Self::Shutdown => "shutdown",
        }
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.client() {
            Some(id) => write!(f, "Action::{}({id})", self.kind()),
            None => write!(f, "Action::{}", self.kind()),
        }
    }
}
