//! Minimum spacing between outbound completion requests.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum delay between consecutive provider requests.
///
/// The check-sleep-update sequence runs under a single async mutex, so
/// concurrent callers are spaced out one after another instead of both
/// passing the elapsed-time check before either records its timestamp.
#[derive(Debug)]
pub struct RateLimiter {
    delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Suspend until at least `delay` has passed since the previous
    /// request, then record now as the last request time.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.delay {
                let remaining = self.delay - elapsed;
                tracing::trace!(wait_ms = remaining.as_millis() as u64, "Rate limit wait");
                tokio::time::sleep(remaining).await;
            }
        }

        *last = Some(Instant::now());
    }
}
