//! Food record persistence.
//!
//! [`FoodStore`] is the seam to whatever holds food records;
//! [`MemoryFoodStore`] keeps them in memory and round-trips a JSON file.
//! [`PersistenceBridge`] merges predictions onto stored records and never
//! fails loudly.

mod bridge;
mod error;
mod memory;
#[cfg(test)]
mod tests;

pub use bridge::{PersistenceBridge, PredictionData};
pub use error::StoreError;
pub use memory::MemoryFoodStore;

use crate::model::FoodRecord;
use async_trait::async_trait;

/// Read/write access to stored food records.
#[async_trait]
pub trait FoodStore: Send + Sync + 'static {
    /// Find a record by id, falling back to a case-insensitive name match.
    async fn get_by_id_or_name(&self, key: &str) -> Result<Option<FoodRecord>, StoreError>;

    /// Insert or replace a record, returning its id.
    async fn import_or_update(&self, record: FoodRecord) -> Result<String, StoreError>;
}
