use super::*;
use crate::model::{
    BioactiveCompounds, BrainNutrients, DataSource, FoodRecord, MentalHealthImpact,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Store whose reads succeed but whose writes always fail.
struct ReadOnlyStore(MemoryFoodStore);

#[async_trait]
impl FoodStore for ReadOnlyStore {
    async fn get_by_id_or_name(&self, key: &str) -> Result<Option<FoodRecord>, StoreError> {
        self.0.get_by_id_or_name(key).await
    }

    async fn import_or_update(&self, _record: FoodRecord) -> Result<String, StoreError> {
        Err(StoreError::Unavailable("read-only".to_string()))
    }
}

fn seeded() -> Arc<MemoryFoodStore> {
    Arc::new(MemoryFoodStore::from_records([
        FoodRecord::new("f1", "Salmon").with_category("Fish"),
        FoodRecord::new("f2", "Blueberry").with_category("Fruit"),
    ]))
}

#[tokio::test]
async fn test_lookup_by_id_then_name() {
    let store = seeded();
    assert_eq!(
        store.get_by_id_or_name("f2").await.unwrap().unwrap().name,
        "Blueberry"
    );
    assert_eq!(
        store.get_by_id_or_name("SALMON").await.unwrap().unwrap().id,
        "f1"
    );
    assert!(store.get_by_id_or_name("kale").await.unwrap().is_none());
}

#[test]
fn test_insert_generates_missing_id_and_keeps_order() {
    let store = MemoryFoodStore::new();
    store.insert(FoodRecord::new("b", "B"));
    let generated = store.insert(FoodRecord::new("", "No id"));
    store.insert(FoodRecord::new("a", "A"));
    store.insert(FoodRecord::new("b", "B updated"));

    assert!(!generated.is_empty());
    let names: Vec<_> = store.records().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["B updated", "No id", "A"]);
}

#[test]
fn test_concurrent_first_insert_takes_one_sequence_number() {
    let store = MemoryFoodStore::new();
    let barrier = std::sync::Barrier::new(16);

    std::thread::scope(|scope| {
        for i in 0..16 {
            let store = &store;
            let barrier = &barrier;
            scope.spawn(move || {
                barrier.wait();
                store.insert(FoodRecord::new("shared", format!("Shared {}", i)));
            });
        }
    });
    store.insert(FoodRecord::new("next", "Next"));

    assert_eq!(store.len(), 2);
    assert_eq!(store.import_seq("shared"), Some(0));
    assert_eq!(store.import_seq("next"), Some(1));
}

#[test]
fn test_json_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foods.json");
    std::fs::write(
        &path,
        r#"[{"id": "f1", "name": "Kefir", "standard_nutrients": {"protein_g": 3.3}}]"#,
    )
    .unwrap();

    let store = MemoryFoodStore::load_json(&path).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.get("f1").unwrap().standard_nutrients.get("protein_g"),
        Some(3.3)
    );

    let out = dir.path().join("out.json");
    store.save_json(&out).unwrap();
    let reloaded = MemoryFoodStore::load_json(&out).unwrap();
    assert_eq!(reloaded.records(), store.records());
}

#[test]
fn test_load_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        MemoryFoodStore::load_json(&missing),
        Err(StoreError::Read { .. })
    ));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{not json").unwrap();
    assert!(matches!(
        MemoryFoodStore::load_json(&bad),
        Err(StoreError::Format { .. })
    ));
}

#[tokio::test]
async fn test_save_brain_nutrients_marks_provenance() {
    let store = seeded();
    let bridge = PersistenceBridge::new(store.clone());
    let nutrients = BrainNutrients {
        zinc_mg: Some(0.6),
        ..Default::default()
    };

    assert!(
        bridge
            .save("f1", PredictionData::BrainNutrients(nutrients.clone()))
            .await
    );

    let record = store.get("f1").unwrap();
    assert_eq!(record.brain_nutrients, Some(nutrients));
    assert_eq!(
        record.data_quality.brain_nutrients_source,
        Some(DataSource::AiGenerated)
    );
    assert!(record.updated_at.is_some());
}

#[tokio::test]
async fn test_save_bioactive_has_no_provenance_flag() {
    let store = seeded();
    let bridge = PersistenceBridge::new(store.clone());
    let mut compounds = BioactiveCompounds::default();
    compounds.compounds.insert("anthocyanins_mg".into(), 160.0);

    assert!(
        bridge
            .save("Blueberry", PredictionData::BioactiveCompounds(compounds))
            .await
    );

    let record = store.get("f2").unwrap();
    assert!(record.bioactive_compounds.is_some());
    assert_eq!(record.data_quality.brain_nutrients_source, None);
    assert_eq!(record.data_quality.impacts_source, None);
}

#[tokio::test]
async fn test_save_impacts_marks_provenance() {
    let store = seeded();
    let bridge = PersistenceBridge::new(store.clone());
    let impact: MentalHealthImpact =
        serde_json::from_value(serde_json::json!({"impact_type": "depression"})).unwrap();

    assert!(
        bridge
            .save("f1", PredictionData::MentalHealthImpacts(vec![impact]))
            .await
    );

    let record = store.get("f1").unwrap();
    assert_eq!(record.mental_health_impacts.len(), 1);
    assert_eq!(
        record.data_quality.impacts_source,
        Some(DataSource::AiGenerated)
    );
}

#[tokio::test]
async fn test_save_fails_soft() {
    let data = PredictionData::BrainNutrients(BrainNutrients::default());

    assert!(!PersistenceBridge::disabled().save("f1", data.clone()).await);

    let bridge = PersistenceBridge::new(seeded());
    assert!(!bridge.save("unknown", data.clone()).await);

    let bridge = PersistenceBridge::new(Arc::new(ReadOnlyStore(MemoryFoodStore::from_records([
        FoodRecord::new("f1", "Salmon"),
    ]))));
    assert!(!bridge.save("f1", data).await);
}
