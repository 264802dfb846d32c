//! Completion client: model/temperature resolution, message splitting,
//! rate limiting and retry around a [`CompletionProvider`].

use super::{
    CompletionError, CompletionProvider, Message, RateLimiter, ResponsesRequest, RetryPolicy, Role,
    TaskType,
};
use crate::config::EnrichConfig;
use crate::logging::generate_request_id;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Per-task model and temperature defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub models: HashMap<String, String>,
    pub temperatures: HashMap<String, f32>,
    pub fallback_model: String,
    pub default_temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        let config = crate::config::OpenAIConfig::default();
        Self {
            models: config.models,
            temperatures: config.temperatures,
            fallback_model: config.fallback_model,
            default_temperature: config.default_temperature,
        }
    }
}

impl ModelSettings {
    pub fn model_for(&self, task: &TaskType) -> &str {
        self.models
            .get(task.as_str())
            .map(String::as_str)
            .unwrap_or(&self.fallback_model)
    }

    pub fn temperature_for(&self, task: &TaskType) -> f32 {
        self.temperatures
            .get(task.as_str())
            .copied()
            .unwrap_or(self.default_temperature)
    }
}

/// Split a message sequence into `(instructions, input)`.
///
/// The first `system` message becomes the instructions and the first `user`
/// message the input; later duplicates and other roles are ignored.
pub fn split_messages(messages: &[Message]) -> (Option<String>, Option<String>) {
    let first = |role: Role| {
        messages
            .iter()
            .find(|m| m.role == role)
            .map(|m| m.content.clone())
    };
    (first(Role::System), first(Role::User))
}

/// Issues structured completion requests for the prediction pipeline.
///
/// One instance owns the rate limiter, so every request made through it
/// shares the same spacing guarantee.
pub struct CompletionClient {
    provider: Arc<dyn CompletionProvider>,
    settings: ModelSettings,
    limiter: RateLimiter,
    retry: RetryPolicy,
}

impl CompletionClient {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        settings: ModelSettings,
        limiter: RateLimiter,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            provider,
            settings,
            limiter,
            retry,
        }
    }

    /// Build a client from configuration around an existing provider.
    pub fn from_config(provider: Arc<dyn CompletionProvider>, config: &EnrichConfig) -> Self {
        let settings = ModelSettings {
            models: config.openai.models.clone(),
            temperatures: config.openai.temperatures.clone(),
            fallback_model: config.openai.fallback_model.clone(),
            default_temperature: config.openai.default_temperature,
        };
        Self::new(
            provider,
            settings,
            RateLimiter::new(Duration::from_millis(config.rate_limit.delay_ms)),
            RetryPolicy::from_config(&config.retry),
        )
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Request a completion and return the model's output text.
    ///
    /// `temperature` and `model` override the per-task defaults. Transient
    /// failures are retried per the client's [`RetryPolicy`]; every failed
    /// attempt is logged with task, model and temperature before the error
    /// is handed back.
    pub async fn complete(
        &self,
        task: &TaskType,
        messages: &[Message],
        temperature: Option<f32>,
        model: Option<&str>,
    ) -> Result<String, CompletionError> {
        let model = model
            .map(str::to_string)
            .unwrap_or_else(|| self.settings.model_for(task).to_string());
        let temperature = temperature.unwrap_or_else(|| self.settings.temperature_for(task));
        let (instructions, input) = split_messages(messages);

        let request = ResponsesRequest::json_object(model, instructions, input, temperature);
        let request_id = generate_request_id();

        debug!(
            request_id = %request_id,
            provider = self.provider.name(),
            task_type = %task,
            model = %request.model,
            temperature,
            "Completion request"
        );

        let request = &request;
        let request_id = request_id.as_str();
        self.retry
            .run(move |attempt| self.attempt(task, request, request_id, attempt))
            .await
    }

    async fn attempt(
        &self,
        task: &TaskType,
        request: &ResponsesRequest,
        request_id: &str,
        attempt: u32,
    ) -> Result<String, CompletionError> {
        self.limiter.wait().await;

        let result = self
            .provider
            .create_response(request)
            .await
            .and_then(|envelope| envelope.into_text());

        match &result {
            Ok(_) => debug!(
                request_id,
                provider = self.provider.name(),
                task_type = %task,
                attempt,
                "Completion response received"
            ),
            Err(e) => error!(
                request_id,
                provider = self.provider.name(),
                task_type = %task,
                model = %request.model,
                temperature = request.temperature,
                attempt,
                error_kind = e.kind(),
                error = %e,
                "Completion request failed"
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ResponseEnvelope;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Provider that replays scripted envelopes and records requests.
    struct ScriptedProvider {
        replies: Mutex<Vec<Result<ResponseEnvelope, CompletionError>>>,
        seen: Mutex<Vec<ResponsesRequest>>,
    }

    impl ScriptedProvider {
        fn new(replies: Vec<Result<ResponseEnvelope, CompletionError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().rev().collect()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn create_response(
            &self,
            request: &ResponsesRequest,
        ) -> Result<ResponseEnvelope, CompletionError> {
            self.seen.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(CompletionError::Connection("script exhausted".into())))
        }
    }

    fn completed(text: &str) -> Result<ResponseEnvelope, CompletionError> {
        Ok(ResponseEnvelope {
            status: "completed".to_string(),
            output_text: Some(text.to_string()),
            ..Default::default()
        })
    }

    fn client(provider: Arc<ScriptedProvider>) -> CompletionClient {
        let mut settings = ModelSettings::default();
        settings
            .models
            .insert("nutrient_prediction".into(), "gpt-4o".into());
        settings
            .temperatures
            .insert("nutrient_prediction".into(), 0.15);
        CompletionClient::new(
            provider,
            settings,
            RateLimiter::new(Duration::ZERO),
            RetryPolicy::new(3, 1.0, Duration::from_millis(2), Duration::from_millis(30))
                .with_unit(Duration::from_millis(1)),
        )
    }

    #[test]
    fn test_split_messages_first_of_each_role() {
        let messages = vec![
            Message::new(Role::Assistant, "ignored"),
            Message::user("question"),
            Message::system("rules"),
            Message::system("second rules"),
            Message::user("second question"),
        ];
        let (instructions, input) = split_messages(&messages);
        assert_eq!(instructions.as_deref(), Some("rules"));
        assert_eq!(input.as_deref(), Some("question"));
    }

    #[test]
    fn test_split_messages_missing_roles() {
        let (instructions, input) = split_messages(&[Message::new(Role::Other, "tool")]);
        assert!(instructions.is_none());
        assert!(input.is_none());
    }

    #[test]
    fn test_model_and_temperature_resolution() {
        let settings = ModelSettings {
            models: HashMap::from([("bioactive_prediction".into(), "gpt-4o".into())]),
            temperatures: HashMap::new(),
            fallback_model: "gpt-4o-mini".into(),
            default_temperature: 0.3,
        };
        assert_eq!(settings.model_for(&TaskType::BioactivePrediction), "gpt-4o");
        assert_eq!(settings.model_for(&TaskType::from("unknown")), "gpt-4o-mini");
        assert_eq!(settings.temperature_for(&TaskType::BioactivePrediction), 0.3);
    }

    #[tokio::test]
    async fn test_complete_uses_task_defaults() {
        let provider = Arc::new(ScriptedProvider::new(vec![completed("{}")]));
        let client = client(Arc::clone(&provider));

        let text = client
            .complete(
                &TaskType::NutrientPrediction,
                &[Message::system("sys"), Message::user("usr")],
                None,
                None,
            )
            .await
            .unwrap();

        assert_eq!(text, "{}");
        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0].model, "gpt-4o");
        assert_eq!(seen[0].temperature, 0.15);
        assert_eq!(seen[0].instructions.as_deref(), Some("sys"));
        assert_eq!(seen[0].input.as_deref(), Some("usr"));
    }

    #[tokio::test]
    async fn test_complete_explicit_overrides_win() {
        let provider = Arc::new(ScriptedProvider::new(vec![completed("{}")]));
        let client = client(Arc::clone(&provider));

        client
            .complete(
                &TaskType::NutrientPrediction,
                &[Message::user("usr")],
                Some(0.9),
                Some("o3-mini"),
            )
            .await
            .unwrap();

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0].model, "o3-mini");
        assert_eq!(seen[0].temperature, 0.9);
    }

    #[tokio::test]
    async fn test_complete_retries_transient_then_succeeds() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(CompletionError::RateLimited("429".into())),
            Err(CompletionError::Timeout(10)),
            completed(r#"{"ok": true}"#),
        ]));
        let client = client(Arc::clone(&provider));

        let text = client
            .complete(&TaskType::MentalHealthImpacts, &[], None, None)
            .await
            .unwrap();

        assert_eq!(text, r#"{"ok": true}"#);
        assert_eq!(provider.seen.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_incomplete_response_is_not_retried() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(ResponseEnvelope {
            status: "incomplete".to_string(),
            incomplete_details: Some(crate::ai::types::IncompleteDetails {
                reason: Some("max_output_tokens".to_string()),
            }),
            ..Default::default()
        })]));
        let client = client(Arc::clone(&provider));

        let result = client
            .complete(&TaskType::MechanismIdentification, &[], None, None)
            .await;

        assert!(matches!(
            result,
            Err(CompletionError::ResponseIncomplete(
                crate::ai::IncompleteReason::MaxOutputTokens
            ))
        ));
        assert_eq!(provider.seen.lock().unwrap().len(), 1);
    }
}
