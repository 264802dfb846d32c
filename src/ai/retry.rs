//! Bounded exponential backoff around completion attempts.

use super::CompletionError;
use crate::config::RetryConfig;
use std::future::Future;
use std::time::Duration;

/// Retry policy for transient provider failures.
///
/// Only errors for which [`CompletionError::is_transient`] holds are retried.
/// The wait after failed attempt `n` is `multiplier * 2^(n-1)` units, clamped
/// to `[min, max]`. When attempts run out the last error is returned as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    multiplier: f64,
    unit: Duration,
    min: Duration,
    max: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, multiplier: f64, min: Duration, max: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            multiplier,
            unit: Duration::from_secs(1),
            min,
            max,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            config.backoff_multiplier,
            Duration::from_secs_f64(config.backoff_min_seconds),
            Duration::from_secs_f64(config.backoff_max_seconds),
        )
    }

    /// Scale of one backoff unit (one second unless overridden).
    pub fn with_unit(mut self, unit: Duration) -> Self {
        self.unit = unit;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait before the attempt following failed attempt `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(63) as i32;
        let raw = self.unit.as_secs_f64() * self.multiplier * 2f64.powi(exponent);
        let raw = if raw.is_finite() { raw } else { f64::MAX };
        let raw = Duration::try_from_secs_f64(raw).unwrap_or(Duration::MAX);
        raw.clamp(self.min, self.max.max(self.min))
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    ///
    /// `op` receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, CompletionError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, CompletionError>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_transient() || attempt >= self.max_attempts => return Err(e),
                Err(e) => {
                    let delay = self.backoff(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error_kind = e.kind(),
                        error = %e,
                        "Transient completion failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
