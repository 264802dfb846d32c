//! Wire and message types for the completion pipeline.

use super::{CompletionError, IncompleteReason};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    /// Any role the pipeline does not route (e.g. "tool", "developer").
    #[serde(other)]
    Other,
}

/// One rendered prompt message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// Label identifying which prediction operation is running.
///
/// Selects model/temperature defaults and tags every log line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskType {
    NutrientPrediction,
    BioactivePrediction,
    MentalHealthImpacts,
    MechanismIdentification,
    ConfidenceCalibration,
    Other(String),
}

impl TaskType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::NutrientPrediction => "nutrient_prediction",
            Self::BioactivePrediction => "bioactive_prediction",
            Self::MentalHealthImpacts => "mental_health_impacts",
            Self::MechanismIdentification => "mechanism_identification",
            Self::ConfidenceCalibration => "confidence_calibration",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for TaskType {
    fn from(value: &str) -> Self {
        match value {
            "nutrient_prediction" => Self::NutrientPrediction,
            "bioactive_prediction" => Self::BioactivePrediction,
            "mental_health_impacts" => Self::MentalHealthImpacts,
            "mechanism_identification" => Self::MechanismIdentification,
            "confidence_calibration" => Self::ConfidenceCalibration,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for `POST /v1/responses`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub temperature: f32,
    pub text: TextConfig,
}

impl ResponsesRequest {
    /// Build a request that asks for a JSON-object shaped output.
    pub fn json_object(
        model: String,
        instructions: Option<String>,
        input: Option<String>,
        temperature: f32,
    ) -> Self {
        Self {
            model,
            instructions,
            input,
            temperature,
            text: TextConfig {
                format: TextFormat {
                    format_type: "json_object".to_string(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextConfig {
    pub format: TextFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

/// Provider response before parsing. Never persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub id: Option<String>,
    pub status: String,
    /// Convenience aggregate some providers include.
    #[serde(default)]
    pub output_text: Option<String>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
    #[serde(default)]
    pub incomplete_details: Option<IncompleteDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub content: Vec<OutputContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputContent {
    #[serde(rename = "type", default)]
    pub content_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncompleteDetails {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Normalized response status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseStatus {
    Completed,
    Incomplete,
    Other(String),
}

impl ResponseEnvelope {
    pub fn status(&self) -> ResponseStatus {
        match self.status.as_str() {
            "completed" => ResponseStatus::Completed,
            "incomplete" => ResponseStatus::Incomplete,
            other => ResponseStatus::Other(other.to_string()),
        }
    }

    /// Output text, from `output_text` or joined from `output_text` parts.
    pub fn text(&self) -> Option<String> {
        if let Some(text) = &self.output_text {
            return Some(text.clone());
        }

        let parts: Vec<&str> = self
            .output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter(|c| c.content_type == "output_text")
            .filter_map(|c| c.text.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.concat())
        }
    }

    /// Resolve the envelope into output text or a typed failure.
    pub fn into_text(self) -> Result<String, CompletionError> {
        match self.status() {
            ResponseStatus::Completed => self.text().ok_or_else(|| {
                CompletionError::InvalidResponse(
                    "completed response carried no output text".to_string(),
                )
            }),
            ResponseStatus::Incomplete => {
                let reason = self
                    .incomplete_details
                    .as_ref()
                    .and_then(|d| d.reason.as_deref())
                    .and_then(IncompleteReason::from_provider);
                match reason {
                    Some(reason) => Err(CompletionError::ResponseIncomplete(reason)),
                    None => Err(CompletionError::UnexpectedStatus(self.status)),
                }
            }
            ResponseStatus::Other(status) => Err(CompletionError::UnexpectedStatus(status)),
        }
    }
}
