//! Fixed-spacing rate limiter shared by every caller of one external API.
//!
//! Each granted acquisition is at least `min_interval` after the previous one.
//! The lock is held while waiting, so concurrent callers are served one at a
//! time in arrival order instead of racing on a timestamp check.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};
use tracing::trace;

/// Gate placed in front of an external API.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_granted: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter that grants at most one acquisition per `min_interval`.
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_granted: Mutex::new(None),
        }
    }

    /// Minimum spacing between two granted acquisitions.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until the caller may issue its request. Never fails, only delays.
    pub async fn acquire(&self) {
        let mut last_granted = self.last_granted.lock().await;
        if let Some(previous) = *last_granted {
            let ready_at = previous + self.min_interval;
            if ready_at > Instant::now() {
                trace!(wait_ms = ?(ready_at - Instant::now()).as_millis(), "Throttling request");
                sleep_until(ready_at).await;
            }
        }
        *last_granted = Some(Instant::now());
    }
}
