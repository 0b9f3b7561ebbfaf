//! JSON protocol types shared between browser client and server.
//!
//! Every frame is a JSON object tagged by `"type"`. Field names are
//! camelCase. The server never trusts a [`ClientMessage`]; it only ever
//! becomes an intent that the game actor validates.

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::role::Role;

// =============================================================================
// CLIENT -> SERVER
// =============================================================================

/// Intents a browser may send. Join and leave are implied by the connection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Move own unit to a cell.
    Move {
        /// Destination column.
        x: i32,
        /// Destination row.
        y: i32,
    },
    /// Attack the unit standing on a cell.
    Attack {
        /// Target column.
        x: i32,
        /// Target row.
        y: i32,
    },
    /// Reveal own die in the pending combat.
    Roll,
    /// Start a new round.
    Reset,
    /// Say something to everyone.
    Chat {
        /// Message body. Older clients send it as `message`.
        #[serde(alias = "message")]
        text: String,
    },
    /// Change display name.
    SetName {
        /// Requested name.
        name: String,
    },
}

// =============================================================================
// SERVER -> CLIENT
// =============================================================================

/// Kind of collectible on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    /// Restores hit points, clamped to max.
    Heal,
    /// Next attack deals fixed damage without a roll.
    AttackBoost,
}

/// Origin of a chat line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatFrom {
    /// First player.
    PlayerA,
    /// Second player.
    PlayerB,
    /// A spectator.
    Spectator,
    /// Server notice.
    System,
}

impl From<Role> for ChatFrom {
    fn from(role: Role) -> Self {
        match role {
            Role::PlayerA => Self::PlayerA,
            Role::PlayerB => Self::PlayerB,
            Role::Spectator => Self::Spectator,
        }
    }
}

/// A unit as seen by clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitView {
    /// Owning role.
    pub owner: Role,
    /// Current cell.
    pub position: Coord,
    /// Current hit points.
    pub hp: u32,
    /// Maximum hit points.
    pub max_hp: u32,
    /// Holds an unused attack boost.
    pub boosted: bool,
}

/// A power-up as seen by clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpView {
    /// What it grants.
    pub kind: PowerUpKind,
    /// Where it lies.
    pub position: Coord,
}

/// Public view of a pending combat. Dice stay hidden until revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatView {
    /// Attacking role.
    pub attacker: Role,
    /// Defending role.
    pub defender: Role,
    /// Attacker has revealed.
    pub attacker_rolled: bool,
    /// Defender has revealed.
    pub defender_rolled: bool,
}

/// Full game snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Row-major occupancy, `grid[y][x]`.
    pub grid: Vec<Vec<Option<Role>>>,
    /// Role whose turn it is.
    pub turn: Role,
    /// Winning role, once decided.
    pub winner: Option<Role>,
    /// Both units, first player first.
    pub units: Vec<UnitView>,
    /// Active power-ups.
    pub power_ups: Vec<PowerUpView>,
    /// Pending combat, if any.
    pub combat: Option<CombatView>,
}

/// Outcome of a rolled combat, sent once both dice are revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatReport {
    /// Attacking role.
    pub attacker: Role,
    /// Defending role.
    pub defender: Role,
    /// Attacker's die.
    pub attacker_roll: u32,
    /// Defender's die.
    pub defender_roll: u32,
    /// Side that won the exchange.
    pub winner: Role,
    /// Damage dealt to the loser.
    pub damage: u32,
    /// Loser's hit points after damage.
    pub loser_hp: u32,
    /// Loser was eliminated.
    pub eliminated: bool,
}

/// Outcome of a boosted attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostedReport {
    /// Attacking role.
    pub attacker: Role,
    /// Defending role.
    pub defender: Role,
    /// Damage dealt.
    pub damage: u32,
    /// Defender's hit points after damage.
    pub defender_hp: u32,
    /// Defender was eliminated.
    pub eliminated: bool,
}

/// Everything the server can say.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Private: the receiver's current role.
    Assigned {
        /// Assigned role.
        role: Role,
    },
    /// Full game state.
    State {
        /// Snapshot.
        game: GameSnapshot,
    },
    /// Private: a rejected request.
    Error {
        /// Human-readable reason.
        message: String,
    },
    /// Chat line or system notice.
    Chat {
        /// Origin.
        from: ChatFrom,
        /// Sender's display name, if set.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Body.
        message: String,
    },
    /// A rolled combat was opened. No dice are included.
    CombatStart {
        /// Attacking role.
        attacker: Role,
        /// Defending role.
        defender: Role,
        /// Always false here.
        attacker_rolled: bool,
        /// Always false here.
        defender_rolled: bool,
    },
    /// One side revealed.
    CombatRolled {
        /// Attacking role.
        attacker: Role,
        /// Defending role.
        defender: Role,
        /// Attacker has revealed.
        attacker_rolled: bool,
        /// Defender has revealed.
        defender_rolled: bool,
        /// Attacker's die, present once revealed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attacker_roll: Option<u32>,
    },
    /// Combat resolved.
    Combat {
        /// Final result.
        result: CombatReport,
        /// State after damage.
        game: GameSnapshot,
    },
    /// Boosted attack resolved.
    CombatBoosted {
        /// Final result.
        result: BoostedReport,
        /// State after damage.
        game: GameSnapshot,
    },
}

impl ServerMessage {
    /// Builds a private error.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }

    /// Builds a public system notice.
    #[must_use]
    pub fn system(message: impl Into<String>) -> Self {
        Self::Chat {
            from: ChatFrom::System,
            name: None,
            message: message.into(),
        }
    }
}
