use crate::ai::CompletionError;
use crate::prompt::TemplateError;
use serde_json::{json, Value};
use std::fmt;

/// Stage of a prediction that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Prompt could not be rendered.
    Template,
    /// Provider call failed after retries, or returned an unusable status.
    Completion,
    /// Model output decoded but had the wrong shape.
    Parse,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Completion => "completion",
            Self::Parse => "parse",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error-tagged outcome of a prediction.
///
/// Orchestrators return this instead of propagating so a failing food or
/// task never stops a batch. `raw_response` holds the model output when
/// there was one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} failure: {message}")]
pub struct PredictionFailure {
    pub kind: FailureKind,
    pub message: String,
    pub raw_response: Option<String>,
}

impl PredictionFailure {
    pub fn template(error: &TemplateError) -> Self {
        Self {
            kind: FailureKind::Template,
            message: error.to_string(),
            raw_response: None,
        }
    }

    pub fn completion(error: &CompletionError) -> Self {
        Self {
            kind: FailureKind::Completion,
            message: error.to_string(),
            raw_response: None,
        }
    }

    pub fn parse(message: impl Into<String>, raw_response: &str) -> Self {
        Self {
            kind: FailureKind::Parse,
            message: message.into(),
            raw_response: Some(raw_response.to_string()),
        }
    }

    /// The failure as an `{"error", "raw_response"}` mapping.
    pub fn to_value(&self) -> Value {
        json!({
            "error": self.message,
            "kind": self.kind.as_str(),
            "raw_response": self.raw_response,
        })
    }
}
