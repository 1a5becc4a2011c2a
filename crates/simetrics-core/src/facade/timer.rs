//! Scoped timing

use super::metrics::Metrics;
use std::time::{Duration, Instant};

/// Records the time since its creation as a distribution sample when dropped
#[derive(Debug)]
#[must_use = "the timer records when dropped"]
pub struct TimeSinceGuard {
    metrics: Metrics,
    name: String,
    start: Instant,
    armed: bool,
}

impl TimeSinceGuard {
    pub(super) fn new(metrics: Metrics, name: &str) -> Self {
        Self {
            metrics,
            name: name.to_string(),
            start: Instant::now(),
            armed: true,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Drop without recording
    pub fn discard(mut self) {
        self.armed = false;
    }
}

impl Drop for TimeSinceGuard {
    fn drop(&mut self) {
        if self.armed {
            self.metrics.time_since(&self.name, self.start);
        }
    }
}
