//! Configuration module for the enrichment pipeline
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//! Settings are read once at startup and handed to the components that need them.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`NUTRIPSYCH_*`, plus the API key variable)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use nutripsych::config::EnrichConfig;
//!
//! let config = EnrichConfig::default();
//! assert_eq!(config.rate_limit.delay_ms, 500);
//!
//! let toml = r#"
//! [retry]
//! max_attempts = 5
//! "#;
//! let config: EnrichConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.retry.max_attempts, 5);
//! assert_eq!(config.retry.backoff_max_seconds, 30.0);
//! ```

pub mod enrichment;
pub mod error;
pub mod logging;
pub mod openai;
pub mod retry;

pub use enrichment::EnrichmentConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use openai::OpenAIConfig;
pub use retry::{RateLimitConfig, RetryConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the enrichment pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EnrichConfig {
    /// Completion provider settings and per-task model defaults
    pub openai: OpenAIConfig,
    /// Spacing between outbound completion requests
    pub rate_limit: RateLimitConfig,
    /// Backoff for transient provider failures
    pub retry: RetryConfig,
    /// Batch behaviour
    pub enrichment: EnrichmentConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl EnrichConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                    path: p.to_path_buf(),
                    source,
                })?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse {
                    path: p.to_path_buf(),
                    message: e.to_string(),
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("NUTRIPSYCH_OPENAI_BASE_URL") {
            self.openai.base_url = url;
        }
        if let Ok(model) = std::env::var("NUTRIPSYCH_MODEL") {
            if !model.trim().is_empty() {
                self.openai.fallback_model = model;
            }
        }
        if let Ok(delay) = std::env::var("NUTRIPSYCH_RATE_LIMIT_DELAY_MS") {
            if let Ok(d) = delay.parse() {
                self.rate_limit.delay_ms = d;
            }
        }

        // Logging settings
        if let Ok(level) = std::env::var("NUTRIPSYCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("NUTRIPSYCH_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.openai.validate()?;
        self.retry.validate()?;
        self.enrichment.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_enrich_config_defaults() {
        let config = EnrichConfig::default();
        assert_eq!(config.openai.base_url, "https://api.openai.com");
        assert_eq!(config.rate_limit.delay_ms, 500);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.enrichment.max_impacts, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [openai]
        fallback_model = "gpt-4o"
        "#;

        let config: EnrichConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.openai.fallback_model, "gpt-4o");
        assert_eq!(config.openai.api_key_env, "OPENAI_API_KEY"); // Default
    }

    #[test]
    fn test_config_parse_example_file() {
        let toml = include_str!("../../nutripsych.example.toml");
        let config: EnrichConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.openai.models.get("mental_health_impacts").map(String::as_str),
            Some("gpt-4o")
        );
    }

    #[test]
    fn test_config_parse_task_tables() {
        let toml = r#"
        [openai.models]
        nutrient_prediction = "gpt-4o"

        [openai.temperatures]
        nutrient_prediction = 0.05
        "#;

        let config: EnrichConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.openai.models["nutrient_prediction"], "gpt-4o");
        assert_eq!(config.openai.temperatures["nutrient_prediction"], 0.05);
        // Declaring the table replaces the default map
        assert!(!config.openai.temperatures.contains_key("confidence_calibration"));
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[rate_limit]\ndelay_ms = 1500").unwrap();

        let config = EnrichConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.rate_limit.delay_ms, 1500);
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[rate_limit\ndelay_ms = ").unwrap();

        let result = EnrichConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = EnrichConfig::load(Some(Path::new("/nonexistent/nutripsych.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = EnrichConfig::load(None).unwrap();
        assert_eq!(config.openai.fallback_model, "gpt-4o-mini");
    }

    #[test]
    fn test_config_env_override_rate_limit() {
        std::env::set_var("NUTRIPSYCH_RATE_LIMIT_DELAY_MS", "250");
        let config = EnrichConfig::default().with_env_overrides();
        std::env::remove_var("NUTRIPSYCH_RATE_LIMIT_DELAY_MS");

        assert_eq!(config.rate_limit.delay_ms, 250);
    }

    #[test]
    fn test_config_env_override_model() {
        std::env::set_var("NUTRIPSYCH_MODEL", "gpt-4.1-mini");
        let config = EnrichConfig::default().with_env_overrides();
        std::env::remove_var("NUTRIPSYCH_MODEL");

        assert_eq!(config.openai.fallback_model, "gpt-4.1-mini");
    }

    #[test]
    fn test_config_env_override_log_level() {
        std::env::set_var("NUTRIPSYCH_LOG_LEVEL", "debug");
        let config = EnrichConfig::default().with_env_overrides();
        std::env::remove_var("NUTRIPSYCH_LOG_LEVEL");

        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_env_override_log_format() {
        std::env::set_var("NUTRIPSYCH_LOG_FORMAT", "json");
        let config = EnrichConfig::default().with_env_overrides();
        std::env::remove_var("NUTRIPSYCH_LOG_FORMAT");

        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_config_env_override_base_url() {
        std::env::set_var("NUTRIPSYCH_OPENAI_BASE_URL", "http://localhost:4010");
        let config = EnrichConfig::default().with_env_overrides();
        std::env::remove_var("NUTRIPSYCH_OPENAI_BASE_URL");

        assert_eq!(config.openai.base_url, "http://localhost:4010");
    }

    #[test]
    fn test_config_validation_zero_concurrency() {
        let mut config = EnrichConfig::default();
        config.enrichment.concurrency = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "enrichment.concurrency"
        ));
    }

    #[test]
    fn test_config_validation_zero_attempts() {
        let mut config = EnrichConfig::default();
        config.retry.max_attempts = 0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "retry.max_attempts"
        ));
    }

    #[test]
    fn test_config_validation_empty_base_url() {
        let mut config = EnrichConfig::default();
        config.openai.base_url = "  ".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field.contains("base_url")
        ));
    }
}
