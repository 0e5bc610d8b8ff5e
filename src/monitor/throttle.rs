// src/monitor/throttle.rs

use std::time::{Duration, Instant};

/// How long the uploads table may go without a reload while the job is
/// running but producing no new results.
pub const IDLE_REFRESH: Duration = Duration::from_millis(10_000);

/// Rate limiter for the expensive full-table reload. New results always
/// refresh immediately; a quiet stretch refreshes at most once per idle
/// window, so the table is never more than the window stale during a long
/// run with no completions.
#[derive(Debug)]
pub struct ThrottledRefresher {
    idle_after: Duration,
    last_refresh: Instant,
}

impl ThrottledRefresher {
    pub fn new(idle_after: Duration, now: Instant) -> Self {
        Self {
            idle_after,
            last_refresh: now,
        }
    }

    /// The "changed" trigger: the caller refreshes unconditionally, this
    /// just resets the idle timer.
    pub fn mark_changed(&mut self, now: Instant) {
        self.last_refresh = now;
    }

    /// The "stalled" trigger: returns whether the idle window has elapsed,
    /// resetting the timer when it has.
    pub fn poke_stalled(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last_refresh) >= self.idle_after {
            self.last_refresh = now;
            true
        } else {
            false
        }
    }
}
