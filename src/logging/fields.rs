//! Field helpers for structured logging

/// Characters of raw model output kept in log previews.
pub const RAW_PREVIEW_CHARS: usize = 500;

/// Truncate raw model output for a log field.
///
/// Returns the full text when `full` is set (content logging enabled),
/// otherwise at most [`RAW_PREVIEW_CHARS`] characters followed by `...`.
/// Cuts on a character boundary.
///
/// # Examples
///
/// ```
/// use nutripsych::logging::truncate_for_log;
///
/// let preview = truncate_for_log(&"x".repeat(600), false);
/// assert_eq!(preview.len(), 503);
/// assert_eq!(truncate_for_log("short", false), "short");
/// ```
pub fn truncate_for_log(raw: &str, full: bool) -> String {
    if full {
        return raw.to_string();
    }
    match raw.char_indices().nth(RAW_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &raw[..cut]),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate_for_log("{}", false), "{}");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let raw = "é".repeat(RAW_PREVIEW_CHARS + 10);
        let preview = truncate_for_log(&raw, false);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), RAW_PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_truncate_full_when_content_logging() {
        let raw = "a".repeat(RAW_PREVIEW_CHARS * 2);
        assert_eq!(truncate_for_log(&raw, true), raw);
    }
}
