//! OpenAI provider configuration

use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// OpenAI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAIConfig {
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub request_timeout_seconds: u64,
    /// Model used when a task has no entry in `models`
    pub fallback_model: String,
    /// Temperature used when a task has no entry in `temperatures`
    pub default_temperature: f32,
    /// Task type → model name
    pub models: HashMap<String, String>,
    /// Task type → temperature
    pub temperatures: HashMap<String, f32>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            request_timeout_seconds: 60,
            fallback_model: "gpt-4o-mini".to_string(),
            default_temperature: 0.3,
            models: HashMap::new(),
            temperatures: default_temperatures(),
        }
    }
}

fn default_temperatures() -> HashMap<String, f32> {
    [
        ("nutrient_prediction", 0.2),
        ("bioactive_prediction", 0.2),
        ("mental_health_impacts", 0.3),
        ("mechanism_identification", 0.2),
        ("confidence_calibration", 0.1),
    ]
    .into_iter()
    .map(|(task, t)| (task.to_string(), t))
    .collect()
}

impl OpenAIConfig {
    /// Read the API key from the configured environment variable.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey {
                env_var: self.api_key_env.clone(),
            }),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "openai.base_url".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        }
        if self.fallback_model.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "openai.fallback_model".to_string(),
                message: "model name cannot be empty".to_string(),
            });
        }

        let temperatures = std::iter::once(("default_temperature", self.default_temperature))
            .chain(self.temperatures.iter().map(|(k, v)| (k.as_str(), *v)));
        for (task, temperature) in temperatures {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ConfigError::Validation {
                    field: format!("openai.temperatures.{}", task),
                    message: format!("temperature {} outside [0, 2]", temperature),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_config_defaults() {
        let config = OpenAIConfig::default();
        assert_eq!(config.fallback_model, "gpt-4o-mini");
        assert_eq!(config.default_temperature, 0.3);
        assert_eq!(config.temperatures.get("confidence_calibration"), Some(&0.1));
        assert!(config.models.is_empty());
    }

    #[test]
    fn test_missing_api_key_env() {
        let config = OpenAIConfig {
            api_key_env: "NUTRIPSYCH_TEST_KEY_THAT_IS_NOT_SET".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.resolve_api_key(),
            Err(ConfigError::MissingApiKey { ref env_var }) if env_var == "NUTRIPSYCH_TEST_KEY_THAT_IS_NOT_SET"
        ));
    }

    #[test]
    fn test_api_key_from_env() {
        std::env::set_var("NUTRIPSYCH_TEST_OPENAI_KEY", "sk-abc");
        let config = OpenAIConfig {
            api_key_env: "NUTRIPSYCH_TEST_OPENAI_KEY".to_string(),
            ..Default::default()
        };
        let key = config.resolve_api_key();
        std::env::remove_var("NUTRIPSYCH_TEST_OPENAI_KEY");

        assert_eq!(key.unwrap(), "sk-abc");
    }

    #[test]
    fn test_temperature_out_of_range_rejected() {
        let mut config = OpenAIConfig::default();
        config
            .temperatures
            .insert("nutrient_prediction".to_string(), 3.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field.ends_with("nutrient_prediction")
        ));
    }
}
