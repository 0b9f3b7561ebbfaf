//! # Actor Seams
//!
//! The actor talks to the outside world through exactly two traits:
//!
//! ```text
//!              ┌──────────────┐
//!   Dice  ───▶ │  GameActor   │ ───▶ ClientSink (one per connection)
//!              └──────────────┘
//! ```
//!
//! - [`Dice`] is the only source of randomness (combat dice, spawn gate,
//!   spawn cell, power-up kind). Production uses [`ChaChaDice`]; tests script
//!   exact values with [`ScriptedDice`].
//! - [`ClientSink`] is a fire-and-forget outbound queue. The gateway provides
//!   a channel-backed sink; tests use [`RecordingSink`].

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use gridduel_shared::ServerMessage;

use crate::error::SinkError;

// ============================================================================
// RANDOMNESS
// ============================================================================

/// Source of every random decision the actor makes.
pub trait Dice: Send {
    /// Rolls a die with `sides` faces, returning `1..=sides`.
    fn roll(&mut self, sides: u32) -> u32;

    /// Returns true with the given probability.
    fn chance(&mut self, probability: f64) -> bool;

    /// Picks an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Fair coin flip.
    fn coin(&mut self) -> bool;
}

/// Production dice backed by a seedable `ChaCha8` stream.
pub struct ChaChaDice {
    rng: ChaCha8Rng,
}

impl ChaChaDice {
    /// Seeds from `seed`, or from OS entropy when `None`.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng }
    }
}

impl Dice for ChaChaDice {
    fn roll(&mut self, sides: u32) -> u32 {
        self.rng.gen_range(1..=sides.max(1))
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }

    fn coin(&mut self) -> bool {
        self.rng.gen()
    }
}

/// Deterministic dice for tests and benchmarks.
///
/// Scripted values are consumed in order. Once a queue runs dry the
/// fallback is used: rolls return 1, the spawn gate returns
/// `spawn_fallback`, picks return 0 and coins return true.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    chances: VecDeque<bool>,
    picks: VecDeque<usize>,
    coins: VecDeque<bool>,
    spawn_fallback: bool,
}

impl ScriptedDice {
    /// Dice that roll 1s and never spawn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues die results.
    #[must_use]
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = u32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    /// Queues spawn-gate results.
    #[must_use]
    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(chances);
        self
    }

    /// Queues cell picks.
    #[must_use]
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Queues coin flips (true = heal).
    #[must_use]
    pub fn with_coins(mut self, coins: impl IntoIterator<Item = bool>) -> Self {
        self.coins.extend(coins);
        self
    }

    /// Gate result once the scripted chances run out.
    #[must_use]
    pub fn always_spawn(mut self, spawn: bool) -> Self {
        self.spawn_fallback = spawn;
        self
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, sides: u32) -> u32 {
        self.rolls.pop_front().unwrap_or(1).clamp(1, sides.max(1))
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.chances.pop_front().unwrap_or(self.spawn_fallback)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % len.max(1)
    }

    fn coin(&mut self) -> bool {
        self.coins.pop_front().unwrap_or(true)
    }
}

// ============================================================================
// OUTBOUND
// ============================================================================

/// Per-connection outbound path.
///
/// `deliver` must never block. Implementations buffer, or fail fast with
/// [`SinkError::Full`] so the actor can drop the client.
pub trait ClientSink: Send {
    /// Queues a message for the connection.
    ///
    /// # Errors
    ///
    /// [`SinkError::Full`] on backpressure, [`SinkError::Closed`] once the
    /// connection is gone.
    fn deliver(&self, message: &ServerMessage) -> Result<(), SinkError>;

    /// Asks the transport to end the connection after flushing.
    fn close(&self);
}

#[derive(Debug, Default)]
struct SinkLog {
    messages: Vec<ServerMessage>,
    closed: bool,
    capacity: Option<usize>,
}

/// Mock sink that records everything it is given.
///
/// Clones share the same log, so a test keeps one clone and hands the other
/// to the actor.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<SinkLog>>,
}

impl RecordingSink {
    /// Creates an unbounded recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that reports [`SinkError::Full`] after `capacity`
    /// undrained messages.
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        let sink = Self::default();
        sink.log.lock().capacity = Some(capacity);
        sink
    }

    /// Copy of every message received so far.
    #[must_use]
    pub fn messages(&self) -> Vec<ServerMessage> {
        self.log.lock().messages.clone()
    }

    /// Removes and returns every message received so far.
    pub fn drain(&self) -> Vec<ServerMessage> {
        std::mem::take(&mut self.log.lock().messages)
    }

    /// Most recent message.
    #[must_use]
    pub fn last(&self) -> Option<ServerMessage> {
        self.log.lock().messages.last().cloned()
    }

    /// Returns true once `close` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.log.lock().closed
    }
}

impl ClientSink for RecordingSink {
    fn deliver(&self, message: &ServerMessage) -> Result<(), SinkError> {
        let mut log = self.log.lock();
        if log.closed {
            return Err(SinkError::Closed);
        }
        if log.capacity.is_some_and(|cap| log.messages.len() >= cap) {
            return Err(SinkError::Full);
        }
        log.messages.push(message.clone());
        Ok(())
    }

    fn close(&self) {
        self.log.lock().closed = true;
    }
}
