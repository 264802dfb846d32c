use super::FoodStore;
use crate::model::{BioactiveCompounds, BrainNutrients, DataSource, MentalHealthImpact};
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// A prediction ready to be merged onto a stored food record.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionData {
    BrainNutrients(BrainNutrients),
    BioactiveCompounds(BioactiveCompounds),
    MentalHealthImpacts(Vec<MentalHealthImpact>),
}

impl PredictionData {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BrainNutrients(_) => "brain_nutrients",
            Self::BioactiveCompounds(_) => "bioactive_compounds",
            Self::MentalHealthImpacts(_) => "mental_health_impacts",
        }
    }
}

/// Best-effort writer of predictions onto stored records.
///
/// Every failure is logged and reported as `false`; nothing here returns
/// an error to the caller.
#[derive(Clone, Default)]
pub struct PersistenceBridge {
    store: Option<Arc<dyn FoodStore>>,
}

impl fmt::Debug for PersistenceBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistenceBridge")
            .field("configured", &self.store.is_some())
            .finish()
    }
}

impl PersistenceBridge {
    pub fn new(store: Arc<dyn FoodStore>) -> Self {
        Self { store: Some(store) }
    }

    /// A bridge with no store; every save returns `false`.
    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Merge `data` onto the record identified by `food_id` and write it back.
    ///
    /// Brain nutrients and impacts are marked AI-generated; bioactive
    /// compounds carry no provenance flag.
    pub async fn save(&self, food_id: &str, data: PredictionData) -> bool {
        let Some(store) = &self.store else {
            warn!(food_id, prediction_type = data.kind(), "No food store configured, prediction not saved");
            return false;
        };
        let prediction_type = data.kind();

        let mut record = match store.get_by_id_or_name(food_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                warn!(food_id, prediction_type, "Food not found, prediction not saved");
                return false;
            }
            Err(e) => {
                warn!(food_id, prediction_type, error = %e, "Failed to load food record");
                return false;
            }
        };

        match data {
            PredictionData::BrainNutrients(nutrients) => {
                record.brain_nutrients = Some(nutrients);
                record.data_quality.brain_nutrients_source = Some(DataSource::AiGenerated);
            }
            PredictionData::BioactiveCompounds(compounds) => {
                record.bioactive_compounds = Some(compounds);
            }
            PredictionData::MentalHealthImpacts(impacts) => {
                record.mental_health_impacts = impacts;
                record.data_quality.impacts_source = Some(DataSource::AiGenerated);
            }
        }
        record.updated_at = Some(Utc::now());

        match store.import_or_update(record).await {
            Ok(id) => {
                info!(food_id = %id, prediction_type, "Saved prediction");
                true
            }
            Err(e) => {
                warn!(food_id, prediction_type, error = %e, "Failed to save prediction");
                false
            }
        }
    }
}
