use super::{json_kind, variables, CalibrationRequest, Enricher, MechanismRequest, PredictionFailure};
use crate::ai::TaskType;
use crate::model::NutrientInteraction;
use crate::parse::missing_fields;
use crate::prompt::TemplateName;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::warn;

impl Enricher {
    /// Explain how a nutrient in a food produces a mental-health impact.
    ///
    /// A record missing any of [`NutrientInteraction::REQUIRED_FIELDS`] is
    /// still returned; the gap is only logged.
    pub async fn extract_mechanism(
        &self,
        request: &MechanismRequest,
    ) -> Result<NutrientInteraction, PredictionFailure> {
        let task = TaskType::MechanismIdentification;
        let started = Instant::now();
        let result = self.extract_mechanism_inner(&task, request).await;
        self.finish(&task, &request.food_name, started, result)
    }

    async fn extract_mechanism_inner(
        &self,
        task: &TaskType,
        request: &MechanismRequest,
    ) -> Result<NutrientInteraction, PredictionFailure> {
        let vars = variables(json!({
            "food_name": request.food_name,
            "nutrient": request.nutrient,
            "impact": request.impact,
            "scientific_context": request.scientific_context,
        }));

        let raw = self
            .complete_task(task, TemplateName::MechanismExtraction, &request.food_name, &vars)
            .await?;

        let map = match self.decode(task, &request.food_name, &raw, json!({})) {
            Value::Object(map) => map,
            other => {
                return Err(PredictionFailure::parse(
                    format!("expected a JSON object describing the mechanism, got {}", json_kind(&other)),
                    &raw,
                ))
            }
        };

        let missing = missing_fields(&map, &NutrientInteraction::REQUIRED_FIELDS);
        if !missing.is_empty() {
            warn!(
                food_name = %request.food_name,
                nutrient = %request.nutrient,
                impact = %request.impact,
                missing = ?missing,
                "Mechanism response missing required fields"
            );
        }

        serde_json::from_value(Value::Object(map))
            .map_err(|e| PredictionFailure::parse(format!("invalid mechanism record: {}", e), &raw))
    }

    /// Recalibrate the confidence values in previously generated data.
    ///
    /// The original data is returned unchanged when the calibration comes
    /// back empty, undecodable or flagged with an `error` key.
    pub async fn calibrate_confidence(
        &self,
        request: &CalibrationRequest,
    ) -> Result<Value, PredictionFailure> {
        let task = TaskType::ConfidenceCalibration;
        let started = Instant::now();
        let result = self.calibrate_inner(&task, request).await;
        self.finish(&task, &request.food_name, started, result)
    }

    async fn calibrate_inner(
        &self,
        task: &TaskType,
        request: &CalibrationRequest,
    ) -> Result<Value, PredictionFailure> {
        let vars = variables(json!({
            "food_name": request.food_name,
            "data_type": request.data_type,
            "generated_data_json": request.generated_data,
            "reference_data_json": request.reference_data,
        }));

        let raw = self
            .complete_task(task, TemplateName::ConfidenceCalibration, &request.food_name, &vars)
            .await?;

        let calibrated = self.decode(task, &request.food_name, &raw, request.generated_data.clone());
        if is_unusable_calibration(&calibrated) {
            warn!(
                food_name = %request.food_name,
                data_type = %request.data_type,
                "Confidence calibration failed, returning original data"
            );
            return Ok(request.generated_data.clone());
        }
        Ok(calibrated)
    }
}

/// Calibrated data must be a non-empty object or array without an `error` key.
fn is_unusable_calibration(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty() || map.contains_key("error"),
        Value::Array(items) => items.is_empty(),
        _ => true,
    }
}
