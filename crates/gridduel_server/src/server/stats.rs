//! Actor timing statistics.

use std::time::Duration;

/// Per-action timing and outcome counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorStats {
    /// Actions processed, accepted or not.
    pub processed: u64,
    /// Actions rejected with an error.
    pub rejected: u64,
    /// Fastest action observed.
    pub min_action_us: u64,
    /// Slowest action observed.
    pub max_action_us: u64,
    /// Rolling average.
    pub avg_action_us: u64,
}

impl ActorStats {
    /// Empty statistics.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            processed: 0,
            rejected: 0,
            min_action_us: u64::MAX,
            max_action_us: 0,
            avg_action_us: 0,
        }
    }

    /// Records one processed action.
    pub fn record(&mut self, duration: Duration, rejected: bool) {
        let us = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        self.min_action_us = self.min_action_us.min(us);
        self.max_action_us = self.max_action_us.max(us);
        self.avg_action_us = if self.processed == 0 {
            us
        } else {
            self.avg_action_us.saturating_mul(15).saturating_add(us) / 16
        };
        self.processed += 1;
        if rejected {
            self.rejected += 1;
        }
    }
}

impl Default for ActorStats {
    fn default() -> Self {
        Self::new()
    }
}
