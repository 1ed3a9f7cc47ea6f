//! Embedded JSON payload extraction.
//!
//! Instagram post pages historically shipped their data in an inline script
//! calling `window.__additionalDataLoaded('<path>', {...});`. The exact
//! callback shape and the key path to the timestamp have changed over the
//! years, so both are configuration, not contract: see
//! [`crate::strategies::EmbeddedBlobConfig`].

use chrono::{DateTime, Utc};
use regex::Regex;

/// Captures the first JSON payload matched by `pattern` in raw markup.
///
/// The pattern's first capture group must cover the JSON object text.
/// Returns `None` when the pattern is absent or the captured text is not
/// valid JSON.
pub fn capture_payload(html: &str, pattern: &Regex) -> Option<serde_json::Value> {
    let caps = pattern.captures(html)?;
    let raw = caps.get(1)?.as_str();
    serde_json::from_str(raw).ok()
}

/// Descends a dotted key path into a JSON value.
///
/// Numeric segments index into arrays: `items.0.taken_at` reads
/// `value["items"][0]["taken_at"]`.
pub fn descend<'a>(value: &'a serde_json::Value, key_path: &str) -> Option<&'a serde_json::Value> {
    let mut current = value;
    for segment in key_path.split('.') {
        current = match segment.parse::<usize>() {
            Ok(index) => current.as_array()?.get(index)?,
            Err(_) => current.as_object()?.get(segment)?,
        };
    }
    Some(current)
}

/// Reads an epoch-seconds number at `key_path` and converts it to an instant.
pub fn timestamp_at(value: &serde_json::Value, key_path: &str) -> Option<DateTime<Utc>> {
    let seconds = descend(value, key_path)?.as_i64()?;
    DateTime::from_timestamp(seconds, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_pattern() -> Regex {
        Regex::new(crate::config::EMBEDDED_CALLBACK_PATTERN).unwrap()
    }

    #[test]
    fn test_capture_payload_legacy_shape() {
        let html = r#"
            <script>
                window.__additionalDataLoaded('/p/ABC123/', {"items": [{"taken_at": 1709288130}]});
            </script>
        "#;
        let payload = capture_payload(html, &legacy_pattern()).unwrap();
        assert!(payload.get("items").is_some());
    }

    #[test]
    fn test_capture_payload_absent() {
        let html = "<script>window.other = {};</script>";
        assert!(capture_payload(html, &legacy_pattern()).is_none());
    }

    #[test]
    fn test_capture_payload_invalid_json() {
        let html = r#"window.__additionalDataLoaded('/p/X/', {broken);"#;
        assert!(capture_payload(html, &legacy_pattern()).is_none());
    }

    #[test]
    fn test_descend_key_path_with_index() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"items": [{"taken_at": 1709288130}]}"#).unwrap();
        let leaf = descend(&value, "items.0.taken_at").unwrap();
        assert_eq!(leaf.as_i64(), Some(1709288130));
    }

    #[test]
    fn test_descend_missing_segment() {
        let value: serde_json::Value = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(descend(&value, "items.0.taken_at").is_none());
        assert!(descend(&value, "graphql.shortcode_media").is_none());
    }

    #[test]
    fn test_timestamp_at_epoch_seconds() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"items": [{"taken_at": 1709288130}]}"#).unwrap();
        let instant = timestamp_at(&value, "items.0.taken_at").unwrap();
        // 1709288130 == 2024-03-01 10:15:30 UTC
        assert_eq!(
            instant.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-03-01 10:15:30"
        );
    }

    #[test]
    fn test_timestamp_at_rejects_non_numeric() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"items": [{"taken_at": "soon"}]}"#).unwrap();
        assert!(timestamp_at(&value, "items.0.taken_at").is_none());
    }
}
