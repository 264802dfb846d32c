//! Prompt template rendering.
//!
//! Orchestrators hand a template name and a variables mapping to a
//! [`TemplateRenderer`] and get back the message sequence to send.
//! [`BuiltinTemplates`] ships the default prompts; callers with their own
//! prompt store implement the trait.

mod templates;

use crate::ai::Message;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Variables substituted into a template.
pub type Variables = Map<String, Value>;

/// Text inserted for variables that are present but null.
pub const NOT_PROVIDED: &str = "Not provided";

/// Prompt templates used by the prediction orchestrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    BrainNutrientPrediction,
    BioactiveCompoundsPrediction,
    MentalHealthImpacts,
    MechanismExtraction,
    ConfidenceCalibration,
}

impl TemplateName {
    pub const ALL: [TemplateName; 5] = [
        Self::BrainNutrientPrediction,
        Self::BioactiveCompoundsPrediction,
        Self::MentalHealthImpacts,
        Self::MechanismExtraction,
        Self::ConfidenceCalibration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BrainNutrientPrediction => "brain_nutrient_prediction",
            Self::BioactiveCompoundsPrediction => "bioactive_compounds_prediction",
            Self::MentalHealthImpacts => "mental_health_impacts",
            Self::MechanismExtraction => "mechanism_extraction",
            Self::ConfidenceCalibration => "confidence_calibration",
        }
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from template rendering.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Template '{template}' references undefined variable '{variable}'")]
    MissingVariable { template: String, variable: String },

    #[error("Template '{template}' has an unclosed placeholder")]
    Unclosed { template: String },
}

/// Turns a template name and variables into an ordered message sequence.
pub trait TemplateRenderer: Send + Sync {
    fn render(
        &self,
        name: TemplateName,
        variables: &Variables,
    ) -> Result<Vec<Message>, TemplateError>;
}

/// The default templates compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    fn source(name: TemplateName) -> (&'static str, &'static str) {
        use templates::*;
        match name {
            TemplateName::BrainNutrientPrediction => (BRAIN_NUTRIENT_SYSTEM, BRAIN_NUTRIENT_USER),
            TemplateName::BioactiveCompoundsPrediction => (BIOACTIVE_SYSTEM, BIOACTIVE_USER),
            TemplateName::MentalHealthImpacts => (IMPACTS_SYSTEM, IMPACTS_USER),
            TemplateName::MechanismExtraction => (MECHANISM_SYSTEM, MECHANISM_USER),
            TemplateName::ConfidenceCalibration => (CALIBRATION_SYSTEM, CALIBRATION_USER),
        }
    }
}

impl TemplateRenderer for BuiltinTemplates {
    fn render(
        &self,
        name: TemplateName,
        variables: &Variables,
    ) -> Result<Vec<Message>, TemplateError> {
        let (system, user) = Self::source(name);
        Ok(vec![
            Message::system(substitute(name.as_str(), system, variables)?),
            Message::user(substitute(name.as_str(), user, variables)?),
        ])
    }
}

/// Render a variable for insertion into prompt text.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => NOT_PROVIDED.to_string(),
        Value::String(s) if s.is_empty() => NOT_PROVIDED.to_string(),
        Value::String(s) => s.clone(),
        Value::Object(map) if map.is_empty() => NOT_PROVIDED.to_string(),
        Value::Object(_) | Value::Array(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

/// Replace every `{{name}}` in `text` with the rendered variable.
///
/// Single braces are left alone so literal JSON examples survive.
pub fn substitute(
    template: &str,
    text: &str,
    variables: &Variables,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or_else(|| TemplateError::Unclosed {
            template: template.to_string(),
        })?;
        let key = after[..end].trim();
        let value = variables
            .get(key)
            .ok_or_else(|| TemplateError::MissingVariable {
                template: template.to_string(),
                variable: key.to_string(),
            })?;
        out.push_str(&render_value(value));
        rest = &after[end + 2..];
    }
    out.push_str(rest);

    Ok(out)
}
