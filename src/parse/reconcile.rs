//! Field reconciliation from decoded model output into typed records.

use crate::model::lenient::as_number;
use crate::model::{BioactiveCompounds, BrainNutrients, MentalHealthImpact, Omega3};
use serde_json::{Map, Value};

const TOTAL_KEYS: [&str; 3] = ["omega3_total_g", "omega3.total_g", "total_g"];
const COMPONENTS: [&str; 3] = ["epa_mg", "dha_mg", "ala_mg"];
const CONFIDENCE_KEYS: [&str; 3] = [
    "confidence_omega3",
    "omega3_confidence",
    "confidence_omega3_total_g",
];

/// Keys that annotate a prediction rather than carry a value.
fn is_metadata_key(key: &str) -> bool {
    key.starts_with("confidence_") || key == "reasoning"
}

/// Look up `key`, falling back to a nested path for dotted keys
/// (`"omega3.total_g"` also matches `{"omega3": {"total_g": ..}}`).
fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(key) {
        return Some(value);
    }
    let (head, tail) = key.split_once('.')?;
    map.get(head)?.as_object()?.get(tail)
}

/// First key in `keys` holding a readable number.
fn first_number(map: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| lookup(map, key).and_then(as_number))
}

/// Reconcile the omega-3 fields of a nutrient prediction.
///
/// Returns `None` unless the total or at least one component was found;
/// a lone confidence value does not create the structure.
pub fn omega3_from_map(map: &Map<String, Value>) -> Option<Omega3> {
    let mut omega3 = Omega3 {
        total_g: first_number(map, &TOTAL_KEYS),
        ..Default::default()
    };
    let mut has_omega3 = omega3.total_g.is_some();

    for component in COMPONENTS {
        let flat = format!("omega3_{}", component);
        let dotted = format!("omega3.{}", component);
        let amount = first_number(map, &[flat.as_str(), dotted.as_str()]);
        if amount.is_some() {
            has_omega3 = true;
        }
        match component {
            "epa_mg" => omega3.epa_mg = amount,
            "dha_mg" => omega3.dha_mg = amount,
            _ => omega3.ala_mg = amount,
        }
    }

    omega3.confidence = first_number(map, &CONFIDENCE_KEYS);

    has_omega3.then_some(omega3)
}

/// Build [`BrainNutrients`] from a decoded nutrient prediction.
///
/// Metadata keys (`confidence_*`, `reasoning`) and anything mentioning
/// "omega" are skipped in the plain-field pass; omega-3 is reconciled
/// separately by [`omega3_from_map`].
pub fn brain_nutrients_from_map(map: &Map<String, Value>) -> BrainNutrients {
    let mut nutrients = BrainNutrients::default();

    for (key, value) in map {
        if is_metadata_key(key) || key.to_lowercase().contains("omega") {
            continue;
        }
        match as_number(value) {
            Some(amount) => {
                if !nutrients.set_field(key, amount) {
                    tracing::trace!(field = %key, "Ignoring unknown nutrient field");
                }
            }
            None => tracing::trace!(field = %key, "Ignoring non-numeric nutrient value"),
        }
    }

    nutrients.omega3 = omega3_from_map(map);
    nutrients
}

/// Build [`BioactiveCompounds`] from a decoded compound prediction.
///
/// Every non-metadata key whose value reads as a number (including unit
/// strings such as `"2.1 mg"`) is a compound; its `confidence_<key>`
/// sibling, if present, is copied under that same key. Other values are
/// dropped with a warning.
pub fn bioactive_from_map(map: &Map<String, Value>) -> BioactiveCompounds {
    let mut result = BioactiveCompounds::default();

    for (key, value) in map {
        if is_metadata_key(key) {
            continue;
        }
        let Some(quantity) = as_number(value) else {
            tracing::warn!(compound = %key, value = %value, "Dropping unreadable compound quantity");
            continue;
        };
        result.compounds.insert(key.clone(), quantity);

        let confidence_key = format!("confidence_{}", key);
        if let Some(confidence) = map.get(&confidence_key).and_then(as_number) {
            result.confidence.insert(confidence_key, confidence);
        }
    }

    result
}

/// Extract impact records from a decoded impacts prediction.
///
/// Accepts a top-level array, an object wrapping the array under
/// `mental_health_impacts` or `impacts` (or, failing that, its first
/// array-valued field), or a single impact object. Items that are not
/// impact-shaped are skipped.
pub fn impacts_from_value(value: Value) -> Vec<MentalHealthImpact> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let wrapped = ["mental_health_impacts", "impacts"]
                .iter()
                .find(|key| map.get(**key).is_some_and(Value::is_array))
                .map(|key| key.to_string())
                .or_else(|| {
                    map.iter()
                        .find(|(_, v)| v.is_array())
                        .map(|(k, _)| k.clone())
                });
            match wrapped {
                Some(key) => match map.remove(&key) {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                },
                None if map.contains_key("impact_type") => vec![Value::Object(map)],
                None => Vec::new(),
            }
        }
        _ => Vec::new(),
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                tracing::warn!(index, "Skipping non-object impact entry");
                return None;
            }
            serde_json::from_value(item)
                .map_err(|e| tracing::warn!(index, error = %e, "Skipping malformed impact entry"))
                .ok()
        })
        .collect()
}
