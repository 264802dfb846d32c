//! Inputs for each prediction task.
//!
//! Structured context (nutrient maps, existing predictions) is held as
//! plain JSON so callers can pass either typed records or ad-hoc data;
//! `with_*` setters normalize whatever they are given.

use crate::model::FoodRecord;
use crate::parse::to_plain_value;
use serde::Serialize;
use serde_json::{Map, Value};

fn plain<T: Serialize + ?Sized>(value: &T) -> Value {
    to_plain_value(value)
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Brain nutrient prediction for one food.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientRequest {
    pub food_name: String,
    pub food_category: String,
    pub standard_nutrients: Value,
    pub existing_brain_nutrients: Value,
    /// Nutrients to focus on; empty means "whatever you can".
    pub target_nutrients: Vec<String>,
    pub scientific_context: Option<String>,
    pub reference_foods: Option<Value>,
    /// Record to persist the prediction onto.
    pub food_id: Option<String>,
}

impl NutrientRequest {
    pub fn new(food_name: impl Into<String>, food_category: impl Into<String>) -> Self {
        Self {
            food_name: food_name.into(),
            food_category: food_category.into(),
            standard_nutrients: empty_object(),
            existing_brain_nutrients: empty_object(),
            target_nutrients: Vec::new(),
            scientific_context: None,
            reference_foods: None,
            food_id: None,
        }
    }

    /// Request for a stored record, persisting back onto it.
    pub fn from_record(record: &FoodRecord) -> Self {
        let mut request = Self::new(&record.name, record.category_or_unknown())
            .with_standard_nutrients(&record.standard_nutrients)
            .with_food_id(&record.id);
        if let Some(existing) = &record.brain_nutrients {
            request = request.with_existing_brain_nutrients(existing);
        }
        request
    }

    pub fn with_standard_nutrients<T: Serialize + ?Sized>(mut self, nutrients: &T) -> Self {
        self.standard_nutrients = plain(nutrients);
        self
    }

    pub fn with_existing_brain_nutrients<T: Serialize + ?Sized>(mut self, nutrients: &T) -> Self {
        self.existing_brain_nutrients = plain(nutrients);
        self
    }

    pub fn with_target_nutrients<I, S>(mut self, nutrients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_nutrients = nutrients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scientific_context(mut self, context: impl Into<String>) -> Self {
        self.scientific_context = Some(context.into());
        self
    }

    pub fn with_reference_foods<T: Serialize + ?Sized>(mut self, foods: &T) -> Self {
        self.reference_foods = Some(plain(foods));
        self
    }

    pub fn with_food_id(mut self, food_id: impl Into<String>) -> Self {
        self.food_id = Some(food_id.into());
        self
    }
}

/// Bioactive compound prediction for one food.
#[derive(Debug, Clone, PartialEq)]
pub struct BioactiveRequest {
    pub food_name: String,
    pub food_category: String,
    pub standard_nutrients: Value,
    pub scientific_context: Option<String>,
    pub processing_method: Option<String>,
    pub additional_compounds: Option<String>,
    pub food_id: Option<String>,
}

impl BioactiveRequest {
    pub fn new(food_name: impl Into<String>, food_category: impl Into<String>) -> Self {
        Self {
            food_name: food_name.into(),
            food_category: food_category.into(),
            standard_nutrients: empty_object(),
            scientific_context: None,
            processing_method: None,
            additional_compounds: None,
            food_id: None,
        }
    }

    pub fn from_record(record: &FoodRecord) -> Self {
        Self::new(&record.name, record.category_or_unknown())
            .with_standard_nutrients(&record.standard_nutrients)
            .with_food_id(&record.id)
    }

    pub fn with_standard_nutrients<T: Serialize + ?Sized>(mut self, nutrients: &T) -> Self {
        self.standard_nutrients = plain(nutrients);
        self
    }

    pub fn with_scientific_context(mut self, context: impl Into<String>) -> Self {
        self.scientific_context = Some(context.into());
        self
    }

    pub fn with_processing_method(mut self, method: impl Into<String>) -> Self {
        self.processing_method = Some(method.into());
        self
    }

    pub fn with_additional_compounds(mut self, compounds: impl Into<String>) -> Self {
        self.additional_compounds = Some(compounds.into());
        self
    }

    pub fn with_food_id(mut self, food_id: impl Into<String>) -> Self {
        self.food_id = Some(food_id.into());
        self
    }
}

/// Mental-health impact prediction for one food.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactsRequest {
    pub food_name: String,
    pub food_category: String,
    pub standard_nutrients: Value,
    pub brain_nutrients: Value,
    pub bioactive_compounds: Value,
    pub scientific_context: Option<String>,
    /// Overrides the enricher's configured limit.
    pub max_impacts: Option<usize>,
    pub food_id: Option<String>,
}

impl ImpactsRequest {
    pub fn new(food_name: impl Into<String>, food_category: impl Into<String>) -> Self {
        Self {
            food_name: food_name.into(),
            food_category: food_category.into(),
            standard_nutrients: empty_object(),
            brain_nutrients: empty_object(),
            bioactive_compounds: empty_object(),
            scientific_context: None,
            max_impacts: None,
            food_id: None,
        }
    }

    pub fn from_record(record: &FoodRecord) -> Self {
        let mut request = Self::new(&record.name, record.category_or_unknown())
            .with_standard_nutrients(&record.standard_nutrients)
            .with_food_id(&record.id);
        if let Some(nutrients) = &record.brain_nutrients {
            request = request.with_brain_nutrients(nutrients);
        }
        if let Some(compounds) = &record.bioactive_compounds {
            request = request.with_bioactive_compounds(compounds);
        }
        request
    }

    pub fn with_standard_nutrients<T: Serialize + ?Sized>(mut self, nutrients: &T) -> Self {
        self.standard_nutrients = plain(nutrients);
        self
    }

    pub fn with_brain_nutrients<T: Serialize + ?Sized>(mut self, nutrients: &T) -> Self {
        self.brain_nutrients = plain(nutrients);
        self
    }

    pub fn with_bioactive_compounds<T: Serialize + ?Sized>(mut self, compounds: &T) -> Self {
        self.bioactive_compounds = plain(compounds);
        self
    }

    pub fn with_scientific_context(mut self, context: impl Into<String>) -> Self {
        self.scientific_context = Some(context.into());
        self
    }

    pub fn with_max_impacts(mut self, max_impacts: usize) -> Self {
        self.max_impacts = Some(max_impacts);
        self
    }

    pub fn with_food_id(mut self, food_id: impl Into<String>) -> Self {
        self.food_id = Some(food_id.into());
        self
    }
}

/// Mechanism of action between one nutrient and one impact.
#[derive(Debug, Clone, PartialEq)]
pub struct MechanismRequest {
    pub food_name: String,
    pub nutrient: String,
    pub impact: String,
    pub scientific_context: Option<String>,
}

impl MechanismRequest {
    pub fn new(
        food_name: impl Into<String>,
        nutrient: impl Into<String>,
        impact: impl Into<String>,
    ) -> Self {
        Self {
            food_name: food_name.into(),
            nutrient: nutrient.into(),
            impact: impact.into(),
            scientific_context: None,
        }
    }

    pub fn with_scientific_context(mut self, context: impl Into<String>) -> Self {
        self.scientific_context = Some(context.into());
        self
    }
}

/// Confidence recalibration of previously generated data.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationRequest {
    pub food_name: String,
    /// Kind of data being calibrated, e.g. "brain_nutrients".
    pub data_type: String,
    pub generated_data: Value,
    pub reference_data: Option<Value>,
}

impl CalibrationRequest {
    pub fn new<T: Serialize + ?Sized>(
        food_name: impl Into<String>,
        data_type: impl Into<String>,
        generated_data: &T,
    ) -> Self {
        Self {
            food_name: food_name.into(),
            data_type: data_type.into(),
            generated_data: plain(generated_data),
            reference_data: None,
        }
    }

    pub fn with_reference_data<T: Serialize + ?Sized>(mut self, reference: &T) -> Self {
        self.reference_data = Some(plain(reference));
        self
    }
}
