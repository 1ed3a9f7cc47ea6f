//! CSV export of batch results.
//!
//! Two files per run: one for rows that yielded a timestamp, one for the
//! rest. Both share the `username,url,timestamp` shape; error rows
//! carry the failure category (and detail, when present) in the timestamp
//! column so a spreadsheet user sees everything in one place.

use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;

use crate::outcome::BatchEntry;

/// One output row, shared by the success and errors files.
#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    username: &'a str,
    url: &'a str,
    timestamp: String,
}

impl<'a> From<&'a BatchEntry> for OutputRow<'a> {
    fn from(entry: &'a BatchEntry) -> Self {
        Self {
            username: &entry.display_name,
            url: &entry.raw_url,
            timestamp: entry.outcome.render(),
        }
    }
}

fn write_entries(path: &Path, entries: &[&BatchEntry]) -> Result<usize> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("failed to create output file: {}", path.display()))?;

    for entry in entries {
        writer.serialize(OutputRow::from(*entry))?;
    }
    // serialize() only emits the header once a row exists; an empty split
    // still gets one so downstream tooling sees a well-formed file.
    if entries.is_empty() {
        writer.write_record(["username", "url", "timestamp"])?;
    }
    writer.flush()?;

    Ok(entries.len())
}

/// Writes successful entries to `path`, returning the row count.
pub fn write_success_csv(path: &Path, entries: &[&BatchEntry]) -> Result<usize> {
    write_entries(path, entries)
}

/// Writes failed entries to `path`, returning the row count.
pub fn write_errors_csv(path: &Path, entries: &[&BatchEntry]) -> Result<usize> {
    write_entries(path, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{ExtractionOutcome, FailureKind};
    use chrono::{TimeZone, Utc};

    fn success_entry() -> BatchEntry {
        BatchEntry {
            display_name: "alice".to_string(),
            raw_url: "https://instagram.com/p/A1/".to_string(),
            outcome: ExtractionOutcome::success(
                Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap(),
            ),
        }
    }

    fn failure_entry() -> BatchEntry {
        BatchEntry {
            display_name: "bob".to_string(),
            raw_url: "https://instagram.com/p/B2/".to_string(),
            outcome: ExtractionOutcome::failure(FailureKind::NotFound, "post B2 does not exist"),
        }
    }

    #[test]
    fn test_success_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("success.csv");

        let entry = success_entry();
        let count = write_success_csv(&path, &[&entry]).unwrap();
        assert_eq!(count, 1);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("username,url,timestamp"));
        assert_eq!(
            lines.next(),
            Some("alice,https://instagram.com/p/A1/,2024-03-01 10:15:30")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_errors_file_carries_failure_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errors.csv");

        let entry = failure_entry();
        write_errors_csv(&path, &[&entry]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("NOT FOUND: post B2 does not exist"));
    }

    #[test]
    fn test_empty_file_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        let count = write_success_csv(&path, &[]).unwrap();
        assert_eq!(count, 0);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim(), "username,url,timestamp");
    }
}
