//! The long-lived food record predictions are merged onto.

use super::{BioactiveCompounds, BrainNutrients, MentalHealthImpact, StandardNutrients};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a block of data on a food record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Usda,
    #[serde(rename = "openfoodfacts")]
    OpenFoodFacts,
    Literature,
    /// Produced by model inference rather than measured or sourced.
    AiGenerated,
}

/// Provenance flags for the enrichable sections of a food record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataQuality {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brain_nutrients_source: Option<DataSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impacts_source: Option<DataSource>,
}

/// A food as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    /// Empty until a store assigns one.
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub standard_nutrients: StandardNutrients,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brain_nutrients: Option<BrainNutrients>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bioactive_compounds: Option<BioactiveCompounds>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mental_health_impacts: Vec<MentalHealthImpact>,
    #[serde(default)]
    pub data_quality: DataQuality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FoodRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            standard_nutrients: StandardNutrients::default(),
            brain_nutrients: None,
            bioactive_compounds: None,
            mental_health_impacts: Vec::new(),
            data_quality: DataQuality::default(),
            updated_at: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_standard_nutrients(mut self, nutrients: StandardNutrients) -> Self {
        self.standard_nutrients = nutrients;
        self
    }

    /// Category label used in prompts when the record has none.
    pub fn category_or_unknown(&self) -> &str {
        self.category.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_source_serde_names() {
        assert_eq!(
            serde_json::to_value(DataSource::AiGenerated).unwrap(),
            json!("ai_generated")
        );
        assert_eq!(
            serde_json::to_value(DataSource::OpenFoodFacts).unwrap(),
            json!("openfoodfacts")
        );
    }

    #[test]
    fn test_food_record_minimal_json() {
        let record: FoodRecord =
            serde_json::from_value(json!({"id": "f1", "name": "Salmon"})).unwrap();
        assert_eq!(record.category_or_unknown(), "unknown");
        assert!(record.brain_nutrients.is_none());
        assert_eq!(record.data_quality, DataQuality::default());
    }
}
