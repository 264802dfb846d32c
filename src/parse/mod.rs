//! Tolerant parsing of model output into typed records.
//!
//! Model replies are "JSON-ish": usually valid JSON, sometimes wrapped in
//! code fences or prose, sometimes with drifted key names. Decoding never
//! raises; callers choose a fallback value and treat it as a soft failure.

mod json;
mod reconcile;

pub use json::{
    missing_fields, normalize_value, parse_json, recover_json_text, to_plain_value,
    try_parse_json, validate_fields,
};
pub use reconcile::{
    bioactive_from_map, brain_nutrients_from_map, impacts_from_value, omega3_from_map,
};
