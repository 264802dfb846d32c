use super::{FoodStore, StoreError};
use crate::model::FoodRecord;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory food store backed by a concurrent map.
///
/// Records remember the order they were first imported in so a JSON file
/// loaded and saved again keeps its layout.
///
/// # Examples
///
/// ```
/// use nutripsych::model::FoodRecord;
/// use nutripsych::store::{FoodStore, MemoryFoodStore};
///
/// # tokio_test::block_on(async {
/// let store = MemoryFoodStore::new();
/// store.insert(FoodRecord::new("salmon-1", "Atlantic Salmon"));
///
/// let found = store.get_by_id_or_name("atlantic salmon").await.unwrap();
/// assert_eq!(found.unwrap().id, "salmon-1");
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MemoryFoodStore {
    records: DashMap<String, (u64, FoodRecord)>,
    next_seq: AtomicU64,
}

impl MemoryFoodStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding `records`.
    pub fn from_records(records: impl IntoIterator<Item = FoodRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Load records from a JSON array file.
    pub fn load_json(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<FoodRecord> =
            serde_json::from_str(&content).map_err(|source| StoreError::Format {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), count = records.len(), "Loaded food records");
        Ok(Self::from_records(records))
    }

    /// Write every record to `path` as a pretty-printed JSON array.
    pub fn save_json(&self, path: &Path) -> Result<(), StoreError> {
        let records = self.records();
        let json = serde_json::to_string_pretty(&records).map_err(|source| StoreError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), count = records.len(), "Saved food records");
        Ok(())
    }

    /// Insert or replace a record, generating an id when it has none.
    pub fn insert(&self, mut record: FoodRecord) -> String {
        if record.id.trim().is_empty() {
            record.id = uuid::Uuid::new_v4().to_string();
        }
        let id = record.id.clone();
        match self.records.entry(id.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().1 = record,
            Entry::Vacant(entry) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                entry.insert((seq, record));
            }
        }
        id
    }

    /// Snapshot of every record in import order.
    pub fn records(&self) -> Vec<FoodRecord> {
        let mut entries: Vec<(u64, FoodRecord)> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, record)| record).collect()
    }

    pub fn get(&self, id: &str) -> Option<FoodRecord> {
        self.records.get(id).map(|entry| entry.1.clone())
    }

    #[cfg(test)]
    pub(super) fn import_seq(&self, id: &str) -> Option<u64> {
        self.records.get(id).map(|entry| entry.0)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl FoodStore for MemoryFoodStore {
    async fn get_by_id_or_name(&self, key: &str) -> Result<Option<FoodRecord>, StoreError> {
        if let Some(record) = self.get(key) {
            return Ok(Some(record));
        }
        let found = self
            .records
            .iter()
            .filter(|entry| entry.1.name.eq_ignore_ascii_case(key))
            .min_by_key(|entry| entry.0)
            .map(|entry| entry.1.clone());
        Ok(found)
    }

    async fn import_or_update(&self, record: FoodRecord) -> Result<String, StoreError> {
        Ok(self.insert(record))
    }
}
