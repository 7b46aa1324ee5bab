//! # Chess Clock
//!
//! Remaining response time for the current claim holder, computed from
//! elapsed wall-clock time and a fixed maximum duration. There is no stored
//! countdown state — the clock is a pure, monotonically non-increasing
//! function of the current time and the single creation timestamp, so it is
//! crash-consistent by construction.

use serde::{Deserialize, Serialize};

use summit_core::Timestamp;

/// A challenge clock started at a fixed instant with a fixed budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessClock {
    /// Instant the clock started (the game's creation timestamp).
    pub started_at: Timestamp,
    /// Maximum duration in seconds.
    pub max_duration: u64,
}

impl ChessClock {
    /// Create a clock with the given start instant and budget.
    pub fn new(started_at: Timestamp, max_duration: u64) -> Self {
        Self {
            started_at,
            max_duration,
        }
    }

    /// Seconds remaining at `now`: `max_duration - elapsed`, zero once
    /// `elapsed >= max_duration`.
    pub fn remaining(&self, now: Timestamp) -> u64 {
        self.max_duration.saturating_sub(now.secs_since(self.started_at))
    }

    /// Whether the clock has fully run out at `now`.
    pub fn expired(&self, now: Timestamp) -> bool {
        self.remaining(now) == 0
    }
}
