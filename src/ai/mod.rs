//! Completion layer: provider abstraction, rate limiting, retry and the
//! client that ties them together.

use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod openai;
pub mod rate_limit;
pub mod retry;
pub mod types;

pub use client::{split_messages, CompletionClient, ModelSettings};
pub use error::{CompletionError, IncompleteReason};
pub use openai::OpenAIProvider;
pub use rate_limit::RateLimiter;
pub use retry::RetryPolicy;
pub use types::{
    Message, ResponseEnvelope, ResponseStatus, ResponsesRequest, Role, TaskType,
};

/// A language-model provider that answers one structured request.
///
/// Implementations perform exactly one HTTP exchange per call and map
/// transport failures onto [`CompletionError`]; retry and rate limiting
/// live in [`CompletionClient`].
///
/// # Object Safety
///
/// Designed to be used as `Arc<dyn CompletionProvider>`.
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Provider name for log lines (e.g., "openai").
    fn name(&self) -> &str;

    /// Send `request` and return the raw response envelope.
    ///
    /// # Returns
    ///
    /// - `Ok(ResponseEnvelope)` for any 2xx reply, whatever its status field
    /// - `Err(CompletionError::RateLimited)` on HTTP 429
    /// - `Err(CompletionError::Timeout)` if the request exceeded its deadline
    /// - `Err(CompletionError::Connection)` if the connection failed
    /// - `Err(CompletionError::Upstream)` for other non-2xx replies
    async fn create_response(
        &self,
        request: &ResponsesRequest,
    ) -> Result<ResponseEnvelope, CompletionError>;
}
