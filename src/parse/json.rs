//! JSON decoding with best-effort recovery.

use serde::Serialize;
use serde_json::{Map, Value};

/// Decode `raw`, recovering from fences and surrounding prose.
///
/// Returns `None` when neither the raw text nor the recovered candidate
/// decodes.
pub fn try_parse_json(raw: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Some(value);
    }
    let candidate = recover_json_text(raw)?;
    serde_json::from_str(&candidate).ok()
}

/// Decode `raw` or return `fallback`. Never fails.
pub fn parse_json(raw: &str, fallback: Value) -> Value {
    match try_parse_json(raw) {
        Some(value) => value,
        None => {
            tracing::debug!(raw_len = raw.len(), "Model output not decodable, using fallback");
            fallback
        }
    }
}

/// Extract the most likely JSON payload from model output.
///
/// Tries a fenced code block first (```` ```json ```` or bare ```` ``` ````);
/// if that is missing or does not decode, the span from the first `{`/`[`
/// to the last matching closer. Returns `None` if nothing resembling JSON
/// is found.
pub fn recover_json_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    if let Some(inner) = fenced_block(trimmed) {
        if serde_json::from_str::<Value>(inner).is_ok() {
            return Some(inner.to_string());
        }
    }

    let open = trimmed.find(['{', '['])?;
    let closer = if trimmed.as_bytes()[open] == b'{' { '}' } else { ']' };
    let close = trimmed.rfind(closer)?;
    (close > open).then(|| trimmed[open..=close].to_string())
}

/// Content of the first fenced block, without its language tag.
fn fenced_block(text: &str) -> Option<&str> {
    let after_fence = text.find("```")? + 3;
    let end = text[after_fence..].find("```")?;
    let inner = strip_language_tag(&text[after_fence..after_fence + end]).trim();
    (!inner.is_empty()).then_some(inner)
}

/// Drop a leading `json`-style tag, on its own line or before the payload.
fn strip_language_tag(block: &str) -> &str {
    let tag_len = block
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(block.len());
    let rest = &block[tag_len..];
    if tag_len > 0 && rest.starts_with(char::is_whitespace) {
        rest
    } else {
        block
    }
}

/// True iff every field in `required` is a key of `map`. No type checks.
pub fn validate_fields(map: &Map<String, Value>, required: &[&str]) -> bool {
    required.iter().all(|field| map.contains_key(*field))
}

/// Fields of `required` absent from `map`, in `required` order.
pub fn missing_fields<'a>(map: &Map<String, Value>, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|field| !map.contains_key(*field))
        .collect()
}

/// Drop null values and `_`-prefixed keys, recursively.
///
/// Lets callers pass either a hydrated record or an ad-hoc mapping as
/// prompt context.
pub fn normalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, value)| !key.starts_with('_') && !value.is_null())
                .map(|(key, value)| (key, normalize_value(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_value).collect()),
        other => other,
    }
}

/// Serialize `value` and normalize it with [`normalize_value`].
pub fn to_plain_value<T: Serialize + ?Sized>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(v) => normalize_value(v),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize prompt context");
            Value::Null
        }
    }
}
