//! OpenAI Responses API provider.

use super::{CompletionError, CompletionProvider, ResponseEnvelope, ResponsesRequest};
use crate::config::{ConfigError, OpenAIConfig};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Provider backed by `POST {base_url}/v1/responses` with Bearer auth.
pub struct OpenAIProvider {
    /// Base URL (e.g., "https://api.openai.com")
    base_url: String,
    /// API key for Bearer authentication
    api_key: String,
    /// Per-request deadline
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Client,
}

impl std::fmt::Debug for OpenAIProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIProvider")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OpenAIProvider {
    pub fn new(base_url: String, api_key: String, timeout: Duration, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
            client,
        }
    }

    /// Build a provider from configuration, resolving the API key from the
    /// configured environment variable.
    pub fn from_config(config: &OpenAIConfig) -> Result<Self, ConfigError> {
        let api_key = config.resolve_api_key()?;
        Ok(Self::new(
            config.base_url.clone(),
            api_key,
            Duration::from_secs(config.request_timeout_seconds),
            Client::new(),
        ))
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn create_response(
        &self,
        request: &ResponsesRequest,
    ) -> Result<ResponseEnvelope, CompletionError> {
        let url = format!("{}/v1/responses", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout(self.timeout_ms())
                } else {
                    CompletionError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::RateLimited(body));
        }
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                CompletionError::Timeout(self.timeout_ms())
            } else {
                CompletionError::Connection(format!("Failed to read response body: {}", e))
            }
        })?;

        serde_json::from_str(&body).map_err(|e| {
            CompletionError::InvalidResponse(format!("Failed to parse responses envelope: {}", e))
        })
    }
}
