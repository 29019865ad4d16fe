//! Rate limit for decoder progress reports

use std::time::Duration;
use tokio::time::Instant;

/// Lets through at most one progress report per interval
#[derive(Debug)]
pub struct ProgressThrottle {
    min_interval: Duration,
    last: Option<Instant>,
}

impl ProgressThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Whether a report arriving at `now` should be forwarded
    pub fn admit(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.min_interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last report, e.g. after a seek or loop
    pub fn reset(&mut self) {
        self.last = None;
    }
}
