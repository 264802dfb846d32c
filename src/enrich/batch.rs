//! Multi-food enrichment with bounded concurrency.

use super::{BioactiveRequest, Enricher, ImpactsRequest, NutrientRequest, PredictionFailure};
use crate::model::FoodRecord;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::info;

/// Per-food prediction selectable in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EnrichTask {
    Nutrients,
    Bioactive,
    Impacts,
}

impl EnrichTask {
    pub const ALL: [EnrichTask; 3] = [Self::Nutrients, Self::Bioactive, Self::Impacts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nutrients => "nutrients",
            Self::Bioactive => "bioactive",
            Self::Impacts => "impacts",
        }
    }
}

impl fmt::Display for EnrichTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one task for one food.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutcome {
    pub task: EnrichTask,
    pub elapsed_ms: u64,
    /// Count of predicted items (nutrient fields, compounds or impacts).
    pub items: usize,
    pub failure: Option<PredictionFailure>,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Everything that happened to one food in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentReport {
    pub food_id: String,
    pub food_name: String,
    pub outcomes: Vec<TaskOutcome>,
}

impl EnrichmentReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(TaskOutcome::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn outcome(&self, task: EnrichTask) -> Option<&TaskOutcome> {
        self.outcomes.iter().find(|o| o.task == task)
    }
}

fn outcome<T>(
    task: EnrichTask,
    started: Instant,
    result: Result<T, PredictionFailure>,
    count: impl FnOnce(&T) -> usize,
) -> (TaskOutcome, Option<T>) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(value) => (
            TaskOutcome {
                task,
                elapsed_ms,
                items: count(&value),
                failure: None,
            },
            Some(value),
        ),
        Err(failure) => (
            TaskOutcome {
                task,
                elapsed_ms,
                items: 0,
                failure: Some(failure),
            },
            None,
        ),
    }
}

impl Enricher {
    /// Run `tasks` for every food, up to the configured number of foods at
    /// a time.
    ///
    /// Tasks for one food run in the order nutrients, bioactive, impacts so
    /// fresh predictions feed the impacts prompt. Reports come back in
    /// input order. A failed task never stops the others.
    pub async fn enrich_batch(
        &self,
        foods: Vec<FoodRecord>,
        tasks: &[EnrichTask],
    ) -> Vec<EnrichmentReport> {
        let started = Instant::now();
        let total = foods.len();

        let mut reports: Vec<(usize, EnrichmentReport)> = stream::iter(foods.into_iter().enumerate())
            .map(|(index, food)| async move { (index, self.enrich_food(food, tasks).await) })
            .buffer_unordered(self.concurrency())
            .collect()
            .await;
        reports.sort_by_key(|(index, _)| *index);

        let failed = reports.iter().filter(|(_, r)| !r.is_success()).count();
        info!(
            foods = total,
            failed,
            concurrency = self.concurrency(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Batch enrichment complete"
        );

        reports.into_iter().map(|(_, report)| report).collect()
    }

    /// Run `tasks` for a single food.
    pub async fn enrich_food(&self, mut food: FoodRecord, tasks: &[EnrichTask]) -> EnrichmentReport {
        let mut outcomes = Vec::with_capacity(tasks.len());

        for task in EnrichTask::ALL.into_iter().filter(|t| tasks.contains(t)) {
            let started = Instant::now();
            let result = match task {
                EnrichTask::Nutrients => {
                    let request = NutrientRequest::from_record(&food);
                    let (result, nutrients) = outcome(
                        task,
                        started,
                        self.predict_nutrients(&request).await,
                        |n| n.populated_fields(),
                    );
                    if let Some(nutrients) = nutrients.filter(|n| !n.is_empty()) {
                        food.brain_nutrients = Some(nutrients);
                    }
                    result
                }
                EnrichTask::Bioactive => {
                    let request = BioactiveRequest::from_record(&food);
                    let (result, compounds) = outcome(
                        task,
                        started,
                        self.predict_bioactive_compounds(&request).await,
                        |c| c.compounds.len(),
                    );
                    if let Some(compounds) = compounds.filter(|c| !c.is_empty()) {
                        food.bioactive_compounds = Some(compounds);
                    }
                    result
                }
                EnrichTask::Impacts => {
                    let request = ImpactsRequest::from_record(&food);
                    outcome(
                        task,
                        started,
                        self.predict_mental_health_impacts(&request).await,
                        Vec::len,
                    )
                    .0
                }
            };
            outcomes.push(result);
        }

        EnrichmentReport {
            food_id: food.id,
            food_name: food.name,
            outcomes,
        }
    }
}
