//! Error types for completion requests.

use thiserror::Error;

/// Why the provider stopped generating before finishing a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompleteReason {
    /// The output hit the token limit.
    MaxOutputTokens,
    /// The output was cut by the provider's content filter.
    ContentFilter,
}

impl IncompleteReason {
    /// Map the provider's reason string; unknown reasons yield `None`.
    pub fn from_provider(reason: &str) -> Option<Self> {
        match reason {
            "max_output_tokens" => Some(Self::MaxOutputTokens),
            "content_filter" => Some(Self::ContentFilter),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxOutputTokens => "max_output_tokens",
            Self::ContentFilter => "content_filter",
        }
    }
}

impl std::fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MaxOutputTokens => write!(f, "output token limit"),
            Self::ContentFilter => write!(f, "content filter"),
        }
    }
}

/// Errors that can occur while requesting a completion.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Provider rejected the request with HTTP 429.
    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    /// Request exceeded its deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Connection could not be established or dropped mid-request.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Provider returned a non-retryable error response (4xx, 5xx).
    #[error("Provider error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Response was truncated before completion.
    #[error("Response incomplete due to {0}")]
    ResponseIncomplete(IncompleteReason),

    /// Provider reported a status outside the known set.
    #[error("Unexpected response status: {0}")]
    UnexpectedStatus(String),

    /// Response body doesn't match the expected envelope.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CompletionError {
    /// Transient failures are expected to succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited(_) | Self::Timeout(_) | Self::Connection(_)
        )
    }

    /// Short machine-readable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RateLimited(_) => "rate_limited",
            Self::Timeout(_) => "timeout",
            Self::Connection(_) => "connection",
            Self::Upstream { .. } => "upstream",
            Self::ResponseIncomplete(_) => "response_incomplete",
            Self::UnexpectedStatus(_) => "unexpected_status",
            Self::InvalidResponse(_) => "invalid_response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(CompletionError::RateLimited("slow down".into()).is_transient());
        assert!(CompletionError::Timeout(60_000).is_transient());
        assert!(CompletionError::Connection("refused".into()).is_transient());

        assert!(!CompletionError::Upstream {
            status: 400,
            message: "bad request".into()
        }
        .is_transient());
        assert!(!CompletionError::ResponseIncomplete(IncompleteReason::ContentFilter).is_transient());
        assert!(!CompletionError::UnexpectedStatus("failed".into()).is_transient());
    }

    #[test]
    fn test_incomplete_reason_mapping() {
        assert_eq!(
            IncompleteReason::from_provider("max_output_tokens"),
            Some(IncompleteReason::MaxOutputTokens)
        );
        assert_eq!(
            IncompleteReason::from_provider("content_filter"),
            Some(IncompleteReason::ContentFilter)
        );
        assert_eq!(IncompleteReason::from_provider("other"), None);
    }

    #[test]
    fn test_incomplete_message_names_reason() {
        let err = CompletionError::ResponseIncomplete(IncompleteReason::MaxOutputTokens);
        assert_eq!(
            err.to_string(),
            "Response incomplete due to output token limit"
        );
    }
}
