//! Scoped wall-clock measurement.
//!
//! A [`ScopedTimer`] takes a start timestamp on construction and invokes a
//! recording callback with the elapsed time when dropped, so the measurement
//! fires on every exit path of the measured scope, early returns and unwinds
//! included.

use std::time::{Duration, Instant};

/// Drop guard that reports the elapsed time of its enclosing scope.
pub struct ScopedTimer<F: FnOnce(Duration)> {
    start: Instant,
    record: Option<F>,
}

impl<F: FnOnce(Duration)> ScopedTimer<F> {
    /// Start measuring; `record` runs exactly once when the timer is
    /// dropped or explicitly stopped.
    pub fn new(record: F) -> Self {
        Self {
            start: Instant::now(),
            record: Some(record),
        }
    }

    /// Stop early, recording and returning the elapsed time.
    pub fn stop(mut self) -> Duration {
        let elapsed = self.start.elapsed();
        if let Some(record) = self.record.take() {
            record(elapsed);
        }
        elapsed
    }
}

impl<F: FnOnce(Duration)> Drop for ScopedTimer<F> {
    fn drop(&mut self) {
        if let Some(record) = self.record.take() {
            record(self.start.elapsed());
        }
    }
}
