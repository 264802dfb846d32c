//! Retry and rate-limit configuration

use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Backoff settings for transient provider failures
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts including the first
    pub max_attempts: u32,
    pub backoff_multiplier: f64,
    pub backoff_min_seconds: f64,
    pub backoff_max_seconds: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_multiplier: 1.0,
            backoff_min_seconds: 2.0,
            backoff_max_seconds: 30.0,
        }
    }
}

impl RetryConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::Validation {
                field: "retry.max_attempts".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        let finite_non_negative = |v: f64| v.is_finite() && v >= 0.0;
        if !finite_non_negative(self.backoff_multiplier)
            || !finite_non_negative(self.backoff_min_seconds)
            || !finite_non_negative(self.backoff_max_seconds)
        {
            return Err(ConfigError::Validation {
                field: "retry".to_string(),
                message: "backoff values must be finite and non-negative".to_string(),
            });
        }
        if self.backoff_min_seconds > self.backoff_max_seconds {
            return Err(ConfigError::Validation {
                field: "retry.backoff_min_seconds".to_string(),
                message: "must not exceed backoff_max_seconds".to_string(),
            });
        }
        Ok(())
    }
}

/// Minimum spacing between outbound completion requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub delay_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { delay_ms: 500 }
    }
}
