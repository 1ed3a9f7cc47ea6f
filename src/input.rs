//! Input roster parsing.
//!
//! Reads the CSV roster of posts to process. Real rosters arrive in several
//! shapes, so the first record is sniffed rather than trusted: if any cell
//! is "url" (case-insensitive) the file is treated as headered and the
//! identity column is found by name; otherwise the columns are positional.
//! Single-column files are a bare URL list.

use std::path::Path;

use thiserror::Error;

/// Errors raised while reading the roster.
#[derive(Error, Debug)]
pub enum InputError {
    /// The file could not be opened or read.
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),
    /// The CSV was structurally malformed.
    #[error("failed to parse input CSV: {0}")]
    Csv(#[from] csv::Error),
    /// The file contained no usable rows.
    #[error("input file contains no URLs")]
    Empty,
}

/// One roster row: who the post belongs to and where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    /// Display name from the roster, empty when the roster has none.
    pub display_name: String,
    /// Raw post URL exactly as the roster carried it (trimmed).
    pub url: String,
}

/// How the identity and URL columns were located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnLayout {
    /// Header row present; indices resolved by name.
    Named { name_idx: Option<usize>, url_idx: usize },
    /// No header; column 0 is identity, column 1 is the URL.
    Positional,
    /// Single column of bare URLs.
    UrlsOnly,
}

/// Header spellings accepted for the identity column.
const NAME_HEADERS: &[&str] = &["username", "influencer name"];

fn detect_layout(first: &csv::StringRecord) -> ColumnLayout {
    let url_idx = first
        .iter()
        .position(|cell| cell.trim().eq_ignore_ascii_case("url"));

    if let Some(url_idx) = url_idx {
        let name_idx = first.iter().position(|cell| {
            let cell = cell.trim().to_ascii_lowercase();
            NAME_HEADERS.contains(&cell.as_str())
        });
        return ColumnLayout::Named { name_idx, url_idx };
    }

    if first.len() == 1 {
        ColumnLayout::UrlsOnly
    } else {
        ColumnLayout::Positional
    }
}

fn row_from_record(record: &csv::StringRecord, layout: ColumnLayout) -> Option<InputRow> {
    let (name, url) = match layout {
        ColumnLayout::Named { name_idx, url_idx } => (
            name_idx.and_then(|i| record.get(i)).unwrap_or(""),
            record.get(url_idx).unwrap_or(""),
        ),
        ColumnLayout::Positional => (record.get(0).unwrap_or(""), record.get(1).unwrap_or("")),
        ColumnLayout::UrlsOnly => ("", record.get(0).unwrap_or("")),
    };

    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    Some(InputRow {
        display_name: name.trim().to_string(),
        url: url.to_string(),
    })
}

/// Parses a roster from raw CSV text.
pub fn parse_rows(data: &str) -> Result<Vec<InputRow>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_bytes());

    let mut records = reader.records();
    let first = match records.next() {
        Some(record) => record?,
        None => return Err(InputError::Empty),
    };

    let layout = detect_layout(&first);
    let mut rows = Vec::new();

    // A headerless first record is itself data.
    if !matches!(layout, ColumnLayout::Named { .. }) {
        rows.extend(row_from_record(&first, layout));
    }

    for record in records {
        let record = record?;
        rows.extend(row_from_record(&record, layout));
    }

    if rows.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(rows)
}

/// Reads and parses the roster file at `path`.
pub fn read_rows(path: &Path) -> Result<Vec<InputRow>, InputError> {
    let data = std::fs::read_to_string(path)?;
    parse_rows(&data)
}
