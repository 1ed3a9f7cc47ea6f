//! `<time>`-element timestamp extraction.
//!
//! Searches rendered markup for a `<time>` element carrying a
//! machine-readable `datetime` attribute in ISO-8601 form (a literal `Z`
//! suffix is accepted as UTC) and parses it to an instant at second
//! resolution.

use chrono::{DateTime, SubsecRound, Utc};
use scraper::{Html, Selector};

/// Finds the first `<time datetime="...">` element and parses its instant.
///
/// Returns `None` when no such element exists or when no candidate attribute
/// parses as ISO-8601. Subsecond precision is truncated.
pub fn find_time_tag(html: &str) -> Option<DateTime<Utc>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("time[datetime]").ok()?;

    for element in document.select(&selector) {
        if let Some(value) = element.value().attr("datetime") {
            if let Some(instant) = parse_iso_instant(value) {
                return Some(instant);
            }
        }
    }
    None
}

/// Parses one ISO-8601 datetime string to a UTC instant, seconds resolution.
pub fn parse_iso_instant(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc).trunc_subsecs(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_tag_round_trip() {
        let html = r#"<html><body><time datetime="2024-03-01T10:15:30.000Z">Mar 1</time></body></html>"#;
        let instant = find_time_tag(html).unwrap();
        assert_eq!(
            instant.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-03-01 10:15:30"
        );
    }

    #[test]
    fn test_time_tag_with_offset() {
        let html = r#"<time datetime="2024-03-01T12:15:30+02:00"></time>"#;
        let instant = find_time_tag(html).unwrap();
        assert_eq!(
            instant.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-03-01 10:15:30"
        );
    }

    #[test]
    fn test_time_tag_absent() {
        let html = "<html><body><p>no timestamps here</p></body></html>";
        assert!(find_time_tag(html).is_none());
    }

    #[test]
    fn test_time_tag_without_datetime_attr() {
        let html = "<time>March 1st</time>";
        assert!(find_time_tag(html).is_none());
    }

    #[test]
    fn test_time_tag_skips_unparseable_values() {
        let html = r#"
            <time datetime="yesterday"></time>
            <time datetime="2024-03-01T10:15:30Z"></time>
        "#;
        let instant = find_time_tag(html).unwrap();
        assert_eq!(
            instant.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-03-01 10:15:30"
        );
    }

    #[test]
    fn test_parse_iso_instant_truncates_subseconds() {
        let instant = parse_iso_instant("2024-03-01T10:15:30.999Z").unwrap();
        assert_eq!(instant.timestamp_subsec_millis(), 0);
        assert_eq!(
            instant.format("%H:%M:%S").to_string(),
            "10:15:30",
            "truncation, not rounding"
        );
    }

    #[test]
    fn test_parse_iso_instant_rejects_garbage() {
        assert!(parse_iso_instant("not a date").is_none());
        assert!(parse_iso_instant("").is_none());
    }
}
