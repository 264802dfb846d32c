//! Prediction orchestrators.
//!
//! Each operation on [`Enricher`] assembles template variables, renders a
//! prompt, calls the completion client, parses the output and, when given
//! a food id, persists the result. Failures come back as
//! [`PredictionFailure`] values; nothing here panics or aborts a batch.

mod batch;
mod error;
mod impacts;
mod mechanism;
mod nutrients;
mod request;

pub use batch::{EnrichTask, EnrichmentReport, TaskOutcome};
pub use error::{FailureKind, PredictionFailure};
pub use request::{
    BioactiveRequest, CalibrationRequest, ImpactsRequest, MechanismRequest, NutrientRequest,
};

use crate::ai::{CompletionClient, TaskType};
use crate::config::EnrichConfig;
use crate::logging::truncate_for_log;
use crate::parse::try_parse_json;
use crate::prompt::{TemplateName, TemplateRenderer, Variables};
use crate::store::{PersistenceBridge, PredictionData};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

const DEFAULT_MAX_IMPACTS: usize = 4;

/// Runs prediction tasks against a completion client.
pub struct Enricher {
    client: CompletionClient,
    templates: Arc<dyn TemplateRenderer>,
    bridge: PersistenceBridge,
    max_impacts: usize,
    concurrency: usize,
    content_logging: bool,
}

impl Enricher {
    /// Enricher without persistence, one food at a time.
    pub fn new(client: CompletionClient, templates: Arc<dyn TemplateRenderer>) -> Self {
        Self {
            client,
            templates,
            bridge: PersistenceBridge::disabled(),
            max_impacts: DEFAULT_MAX_IMPACTS,
            concurrency: 1,
            content_logging: false,
        }
    }

    pub fn from_config(
        client: CompletionClient,
        templates: Arc<dyn TemplateRenderer>,
        config: &EnrichConfig,
    ) -> Self {
        Self::new(client, templates)
            .with_max_impacts(config.enrichment.max_impacts)
            .with_concurrency(config.enrichment.concurrency)
            .with_content_logging(config.logging.enable_content_logging)
    }

    pub fn with_persistence(mut self, bridge: PersistenceBridge) -> Self {
        self.bridge = bridge;
        self
    }

    pub fn with_max_impacts(mut self, max_impacts: usize) -> Self {
        self.max_impacts = max_impacts;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Log raw model output in full instead of a truncated preview.
    pub fn with_content_logging(mut self, enabled: bool) -> Self {
        self.content_logging = enabled;
        self
    }

    pub fn client(&self) -> &CompletionClient {
        &self.client
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Render `template` and request a completion for `task`.
    async fn complete_task(
        &self,
        task: &TaskType,
        template: TemplateName,
        food_name: &str,
        variables: &Variables,
    ) -> Result<String, PredictionFailure> {
        let messages = self
            .templates
            .render(template, variables)
            .map_err(|e| PredictionFailure::template(&e))?;

        debug!(
            food_name,
            task_type = %task,
            template = %template,
            messages = messages.len(),
            "Rendered prompt"
        );

        self.client
            .complete(task, &messages, None, None)
            .await
            .map_err(|e| PredictionFailure::completion(&e))
    }

    /// Decode model output, falling back when nothing decodable is found.
    fn decode(&self, task: &TaskType, food_name: &str, raw: &str, fallback: Value) -> Value {
        match try_parse_json(raw) {
            Some(value) => value,
            None => {
                warn!(
                    food_name,
                    task_type = %task,
                    raw_response = %truncate_for_log(raw, self.content_logging),
                    "Unparseable model output, using empty result"
                );
                fallback
            }
        }
    }

    /// Log the outcome of one orchestrator call with its duration.
    fn finish<T>(
        &self,
        task: &TaskType,
        food_name: &str,
        started: Instant,
        result: Result<T, PredictionFailure>,
    ) -> Result<T, PredictionFailure> {
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => info!(food_name, task_type = %task, elapsed_ms, "Prediction complete"),
            Err(failure) => error!(
                food_name,
                task_type = %task,
                elapsed_ms,
                failure_kind = failure.kind.as_str(),
                error = %failure.message,
                raw_response = %failure
                    .raw_response
                    .as_deref()
                    .map(|raw| truncate_for_log(raw, self.content_logging))
                    .unwrap_or_default(),
                "Prediction failed"
            ),
        }
        result
    }

    /// Persist onto `food_id` when one was given. Outcome is only logged.
    async fn persist(&self, food_id: Option<&str>, data: PredictionData) {
        let Some(food_id) = food_id else {
            return;
        };
        if !self.bridge.is_enabled() {
            debug!(food_id, prediction_type = data.kind(), "Persistence disabled, skipping save");
            return;
        }
        self.bridge.save(food_id, data).await;
    }
}

/// Template variables from a `json!` object literal.
fn variables(value: Value) -> Variables {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Short description of a decoded value's type for error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
