//! Client roles.

use serde::{Deserialize, Serialize};

/// What a connected client is allowed to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Holds the first player slot and moves first after a reset.
    PlayerA,
    /// Holds the second player slot.
    PlayerB,
    /// Watches and chats.
    Spectator,
}

impl Role {
    /// Returns true for either player role.
    #[inline]
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, Self::PlayerA | Self::PlayerB)
    }

    /// The other player. Spectators have no opponent.
    #[must_use]
    pub const fn opponent(self) -> Option<Self> {
        match self {
            Self::PlayerA => Some(Self::PlayerB),
            Self::PlayerB => Some(Self::PlayerA),
            Self::Spectator => None,
        }
    }

    /// Wire name, as used in chat notices.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlayerA => "player_a",
            Self::PlayerB => "player_b",
            Self::Spectator => "spectator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two player roles, in slot order.
pub const PLAYERS: [Role; 2] = [Role::PlayerA, Role::PlayerB];
