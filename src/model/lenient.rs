//! Tolerant deserializers for model-produced fields.
//!
//! Language models drift between `0.8`, `"0.8"` and `"high"` for the same
//! field. These helpers accept what can be read and turn the rest into
//! `None` / empty instead of failing the whole record.

use super::ResearchSupport;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a finite number from a JSON value.
///
/// Strings are accepted when they are a number or start with a decimal
/// number, so `"2.1"`, `"2.1e0"` and `"2.1 mg"` all read as `2.1`.
/// `"NaN"`, `"inf"` and overflowing values are rejected.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<f64>().ok().or_else(|| leading_number(s))
        }
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Parse the decimal number at the start of `text`, ignoring any unit suffix.
fn leading_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end = 1;
    }
    let digits_start = end;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    let number = &text[..end];
    if !number[digits_start..].bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    number.parse().ok()
}

/// Deserialize an optional `f64`, mapping unreadable values to `None`.
pub fn option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_number))
}

/// Deserialize an optional integer year, mapping unreadable values to `None`.
pub fn option_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(as_number)
        .filter(|n| n.fract() == 0.0 && n.abs() < i32::MAX as f64)
        .map(|n| n as i32))
}

/// Deserialize an optional string, rendering non-string scalars as text.
pub fn option_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Deserialize a list of strings.
///
/// Accepts a single string (one element), an array of strings, or an array
/// mixing strings and objects (objects are kept as compact JSON text).
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => vec![s],
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
            .collect(),
        Some(other) => vec![other.to_string()],
    })
}

/// Deserialize research citations.
///
/// Accepts an array of citation objects, a single object, or a bare string
/// (kept as the citation). Entries that cannot be read are dropped.
pub fn research_list<'de, D>(deserializer: D) -> Result<Vec<ResearchSupport>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => vec![other],
    };
    Ok(items.into_iter().filter_map(research_entry).collect())
}

fn research_entry(item: Value) -> Option<ResearchSupport> {
    match item {
        Value::String(citation) if !citation.trim().is_empty() => Some(ResearchSupport {
            citation: Some(citation),
            ..Default::default()
        }),
        Value::Object(_) => serde_json::from_value(item).ok(),
        _ => None,
    }
}
