//! nutripsych - AI enrichment for a nutritional psychiatry food database
//!
//! This library predicts brain-relevant nutrients, bioactive compounds and
//! mental-health impacts for foods through a rate-limited, retrying
//! completion client, parses the model's loosely structured output into
//! typed records and merges the results onto stored food records.
//!
//! # Example
//!
//! ```no_run
//! use nutripsych::ai::{CompletionClient, OpenAIProvider};
//! use nutripsych::config::EnrichConfig;
//! use nutripsych::enrich::{Enricher, NutrientRequest};
//! use nutripsych::prompt::BuiltinTemplates;
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = EnrichConfig::default().with_env_overrides();
//! let provider = OpenAIProvider::from_config(&config.openai)?;
//! let client = CompletionClient::from_config(Arc::new(provider), &config);
//! let enricher = Enricher::from_config(client, Arc::new(BuiltinTemplates), &config);
//!
//! let request = NutrientRequest::new("Atlantic salmon", "Fish")
//!     .with_target_nutrients(["omega3_total_g", "vitamin_d_mcg"]);
//! match enricher.predict_nutrients(&request).await {
//!     Ok(nutrients) => println!("{:?}", nutrients.omega3),
//!     Err(failure) => eprintln!("prediction failed: {}", failure),
//! }
//! # Ok(())
//! # }
//! ```

pub mod ai;
pub mod cli;
pub mod config;
pub mod enrich;
pub mod logging;
pub mod model;
pub mod parse;
pub mod prompt;
pub mod store;
