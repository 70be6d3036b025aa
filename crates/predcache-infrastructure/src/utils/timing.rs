//! Probe timing on the tokio clock

use tokio::time::Instant;

/// Measures how long a health probe takes
///
/// Reads the tokio clock, so paused-time tests observe the advanced time.
pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    /// Start measuring now
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds elapsed since [`TimedOperation::start`]
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}
