use super::{json_kind, variables, Enricher, ImpactsRequest, PredictionFailure};
use crate::ai::TaskType;
use crate::model::MentalHealthImpact;
use crate::parse::impacts_from_value;
use crate::prompt::TemplateName;
use crate::store::PredictionData;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::warn;

impl Enricher {
    /// Predict mental-health impacts for a food.
    ///
    /// Returns an empty list, with a warning, when the model reports none
    /// or its output cannot be decoded.
    pub async fn predict_mental_health_impacts(
        &self,
        request: &ImpactsRequest,
    ) -> Result<Vec<MentalHealthImpact>, PredictionFailure> {
        let task = TaskType::MentalHealthImpacts;
        let started = Instant::now();
        let result = self.predict_impacts_inner(&task, request).await;
        self.finish(&task, &request.food_name, started, result)
    }

    async fn predict_impacts_inner(
        &self,
        task: &TaskType,
        request: &ImpactsRequest,
    ) -> Result<Vec<MentalHealthImpact>, PredictionFailure> {
        let vars = variables(json!({
            "food_name": request.food_name,
            "food_category": request.food_category,
            "standard_nutrients": request.standard_nutrients,
            "brain_nutrients": request.brain_nutrients,
            "bioactive_compounds": request.bioactive_compounds,
            "scientific_context": request.scientific_context,
            "max_impacts": request.max_impacts.unwrap_or(self.max_impacts),
        }));

        let raw = self
            .complete_task(task, TemplateName::MentalHealthImpacts, &request.food_name, &vars)
            .await?;

        let decoded = self.decode(task, &request.food_name, &raw, json!([]));
        if !matches!(decoded, Value::Array(_) | Value::Object(_)) {
            return Err(PredictionFailure::parse(
                format!("expected a JSON array of impacts, got {}", json_kind(&decoded)),
                &raw,
            ));
        }

        let impacts = impacts_from_value(decoded);
        if impacts.is_empty() {
            warn!(food_name = %request.food_name, "No mental health impacts found");
            return Ok(impacts);
        }

        self.persist(
            request.food_id.as_deref(),
            PredictionData::MentalHealthImpacts(impacts.clone()),
        )
        .await;
        Ok(impacts)
    }
}
