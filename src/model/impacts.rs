//! Mental-health impact and mechanism-of-action records.

use super::lenient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Research backing a claimed impact.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResearchSupport {
    #[serde(default, deserialize_with = "lenient::option_string", skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_string", skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_string", skip_serializing_if = "Option::is_none")]
    pub study_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_i32", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// One claimed relationship between a food (or a nutrient in it) and a
/// mental-health outcome.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MentalHealthImpact {
    /// Outcome affected, e.g. "mood_depression".
    #[serde(default, deserialize_with = "lenient::option_string", skip_serializing_if = "Option::is_none")]
    pub impact_type: Option<String>,
    /// "positive", "negative" or "neutral".
    #[serde(default, deserialize_with = "lenient::option_string", skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_string", skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_string", skip_serializing_if = "Option::is_none")]
    pub time_to_effect: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_string", skip_serializing_if = "Option::is_none")]
    pub research_context: Option<String>,
    #[serde(default, deserialize_with = "lenient::research_list", skip_serializing_if = "Vec::is_empty")]
    pub research_support: Vec<ResearchSupport>,
    #[serde(default, deserialize_with = "lenient::option_string", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Fields the model added beyond the known schema.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Mechanism of action linking a nutrient to an impact.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientInteraction {
    #[serde(default, deserialize_with = "lenient::option_string", skip_serializing_if = "Option::is_none")]
    pub primary_pathway: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub detailed_steps: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub key_molecules: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub brain_regions: Vec<String>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl NutrientInteraction {
    /// Fields a well-formed mechanism record carries.
    pub const REQUIRED_FIELDS: [&'static str; 4] =
        ["primary_pathway", "detailed_steps", "key_molecules", "confidence"];
}
