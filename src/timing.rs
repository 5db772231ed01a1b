//! Phase timing for `--verbose` diagnostics.

use std::time::{Duration, Instant};

/// Wall-clock time of one scan phase, logged when it ends.
pub struct Timer {
    phase: &'static str,
    start: Instant,
}

impl Timer {
    pub fn start(phase: &'static str) -> Self {
        Self {
            phase,
            start: Instant::now(),
        }
    }

    /// Log the elapsed time at debug level and return it.
    pub fn finish(self) -> Duration {
        let elapsed = self.start.elapsed();
        tracing::debug!(
            phase = self.phase,
            elapsed_ms = elapsed.as_millis() as u64,
            "phase finished"
        );
        elapsed
    }
}
