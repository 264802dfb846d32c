//! Enrich command implementation

use crate::ai::{CompletionClient, OpenAIProvider};
use crate::cli::{output, EnrichArgs};
use crate::config::EnrichConfig;
use crate::enrich::Enricher;
use crate::prompt::BuiltinTemplates;
use crate::store::{MemoryFoodStore, PersistenceBridge};
use anyhow::Context;
use std::sync::Arc;

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(args: &EnrichArgs) -> anyhow::Result<EnrichConfig> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        EnrichConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        EnrichConfig::default()
    };

    config = config.with_env_overrides();

    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if let Some(concurrency) = args.concurrency {
        config.enrichment.concurrency = concurrency;
    }

    config.validate()?;
    Ok(config)
}

/// Run `nutripsych enrich`
pub async fn run_enrich(args: EnrichArgs) -> anyhow::Result<()> {
    let config = load_config_with_overrides(&args)?;

    crate::logging::init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let store = Arc::new(
        MemoryFoodStore::load_json(&args.foods)
            .with_context(|| format!("Failed to load foods from {}", args.foods.display()))?,
    );
    let provider = OpenAIProvider::from_config(&config.openai)?;

    tracing::info!(
        foods = store.len(),
        tasks = ?args.tasks,
        concurrency = config.enrichment.concurrency,
        base_url = %config.openai.base_url,
        "Starting enrichment"
    );

    let client = CompletionClient::from_config(Arc::new(provider), &config);
    let enricher = Enricher::from_config(client, Arc::new(BuiltinTemplates), &config)
        .with_persistence(PersistenceBridge::new(store.clone()));

    let reports = enricher.enrich_batch(store.records(), &args.tasks).await;

    let output_path = args.output.as_ref().unwrap_or(&args.foods);
    store
        .save_json(output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    if args.json {
        println!("{}", output::format_reports_json(&reports)?);
    } else {
        println!("{}", output::format_reports_table(&reports));
        println!("{}", output::format_summary_line(&reports, output_path));
    }

    Ok(())
}
