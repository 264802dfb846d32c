use super::{json_kind, variables, Enricher, NutrientRequest, BioactiveRequest, PredictionFailure};
use crate::ai::TaskType;
use crate::model::{BioactiveCompounds, BrainNutrients};
use crate::parse::{bioactive_from_map, brain_nutrients_from_map};
use crate::prompt::TemplateName;
use crate::store::PredictionData;
use serde_json::{json, Value};
use std::time::Instant;

impl Enricher {
    /// Predict brain-relevant nutrients for a food.
    ///
    /// Undecodable output yields an empty [`BrainNutrients`]; a decodable
    /// non-object is a parse failure. Non-empty predictions are saved when
    /// the request carries a food id.
    pub async fn predict_nutrients(
        &self,
        request: &NutrientRequest,
    ) -> Result<BrainNutrients, PredictionFailure> {
        let task = TaskType::NutrientPrediction;
        let started = Instant::now();
        let result = self.predict_nutrients_inner(&task, request).await;
        self.finish(&task, &request.food_name, started, result)
    }

    async fn predict_nutrients_inner(
        &self,
        task: &TaskType,
        request: &NutrientRequest,
    ) -> Result<BrainNutrients, PredictionFailure> {
        let vars = variables(json!({
            "food_name": request.food_name,
            "food_category": request.food_category,
            "standard_nutrients_json": request.standard_nutrients,
            "existing_brain_nutrients_json": request.existing_brain_nutrients,
            "target_nutrients_list": request.target_nutrients.join(", "),
            "scientific_context": request.scientific_context,
            "reference_foods_json": request.reference_foods,
        }));

        let raw = self
            .complete_task(task, TemplateName::BrainNutrientPrediction, &request.food_name, &vars)
            .await?;

        let nutrients = match self.decode(task, &request.food_name, &raw, json!({})) {
            Value::Object(map) => brain_nutrients_from_map(&map),
            other => {
                return Err(PredictionFailure::parse(
                    format!("expected a JSON object of nutrients, got {}", json_kind(&other)),
                    &raw,
                ))
            }
        };

        if !nutrients.is_empty() {
            self.persist(
                request.food_id.as_deref(),
                PredictionData::BrainNutrients(nutrients.clone()),
            )
            .await;
        }
        Ok(nutrients)
    }

    /// Predict bioactive compound content for a food.
    pub async fn predict_bioactive_compounds(
        &self,
        request: &BioactiveRequest,
    ) -> Result<BioactiveCompounds, PredictionFailure> {
        let task = TaskType::BioactivePrediction;
        let started = Instant::now();
        let result = self.predict_bioactive_inner(&task, request).await;
        self.finish(&task, &request.food_name, started, result)
    }

    async fn predict_bioactive_inner(
        &self,
        task: &TaskType,
        request: &BioactiveRequest,
    ) -> Result<BioactiveCompounds, PredictionFailure> {
        let vars = variables(json!({
            "food_name": request.food_name,
            "food_category": request.food_category,
            "standard_nutrients_json": request.standard_nutrients,
            "scientific_context": request.scientific_context,
            "processing_method": request.processing_method,
            "additional_compounds": request.additional_compounds,
        }));

        let raw = self
            .complete_task(
                task,
                TemplateName::BioactiveCompoundsPrediction,
                &request.food_name,
                &vars,
            )
            .await?;

        let compounds = match self.decode(task, &request.food_name, &raw, json!({})) {
            Value::Object(map) => bioactive_from_map(&map),
            other => {
                return Err(PredictionFailure::parse(
                    format!("expected a JSON object of compounds, got {}", json_kind(&other)),
                    &raw,
                ))
            }
        };

        if !compounds.is_empty() {
            self.persist(
                request.food_id.as_deref(),
                PredictionData::BioactiveCompounds(compounds.clone()),
            )
            .await;
        }
        Ok(compounds)
    }
}
