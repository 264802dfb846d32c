//! Structured logging setup and field helpers.
//!
//! Everything logs through `tracing` with structured fields (`task_type`,
//! `model`, `request_id`, `food_id`, ...); this module builds the subscriber
//! from [`LoggingConfig`](crate::config::LoggingConfig).

pub mod correlation;
pub mod fields;

pub use correlation::generate_request_id;
pub use fields::{truncate_for_log, RAW_PREVIEW_CHARS};

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
///
/// # Examples
///
/// ```
/// use nutripsych::config::{LogFormat, LoggingConfig};
/// use nutripsych::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(HashMap::from([("ai".to_string(), "debug".to_string())])),
///     enable_content_logging: false,
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,nutripsych::ai=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",nutripsych::{}={}", component, level));
        }
    }

    filter_str
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured directives.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    if config.enable_content_logging {
        tracing::warn!("Content logging enabled: raw model output will be logged in full");
    }

    Ok(())
}
