//! Batch enrichment configuration

use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Batch enrichment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Foods enriched at the same time in a batch
    pub concurrency: usize,
    /// Upper bound on impacts requested per food
    pub max_impacts: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            max_impacts: 4,
        }
    }
}

impl EnrichmentConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::Validation {
                field: "enrichment.concurrency".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
