//! URL validation and post-reference normalization.
//!
//! Turns one raw input row into a [`PostReference`] carrying the canonical
//! shortcode, or a terminal [`NormalizeError`] that the batch records as a
//! `BadUrl` failure without invoking any strategy.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::config::{MAX_URL_LENGTH, POST_PATH_PATTERN, UNKNOWN_DISPLAY_NAME};

/// Why a raw URL could not be normalized. Terminal: no strategy is attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The URL field was empty after trimming.
    #[error("empty URL")]
    Empty,

    /// The URL exceeds the maximum accepted length.
    #[error("URL exceeds {MAX_URL_LENGTH} characters")]
    TooLong,

    /// The URL is not syntactically valid http(s).
    #[error("not a valid http(s) URL")]
    InvalidUrl,

    /// The URL parses but carries none of the known post-path shapes.
    #[error("no /p/, /reel/ or /tv/ post path in URL")]
    UnrecognizedPath,
}

/// A validated reference to one post, created from one input row.
///
/// Immutable once created. `post_id` uniquely determines which post a
/// strategy targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReference {
    /// The raw URL as supplied, trimmed.
    pub raw_url: String,
    /// Canonical post identifier (the shortcode).
    pub post_id: String,
    /// Identity column value; `"unknown"` when absent.
    pub display_name: String,
}

fn post_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // The pattern is a compile-time constant; a failure here is a
        // programming error caught by the tests below.
        #[allow(clippy::expect_used)]
        Regex::new(POST_PATH_PATTERN).expect("post path pattern must compile")
    })
}

/// Validates a raw URL and extracts a [`PostReference`] from it.
///
/// Trims whitespace from both fields, validates the URL is syntactically
/// valid http(s) (a missing scheme gets `https://` prepended first), then
/// matches the three known post-path shapes (`/p/<id>`, `/reel/<id>`,
/// `/tv/<id>`) with optional trailing slash and optional query/fragment.
///
/// `display_name` defaults to `"unknown"` when the username field is empty;
/// trimming only, no case folding.
pub fn normalize(raw_url: &str, raw_username: &str) -> Result<PostReference, NormalizeError> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::Empty);
    }
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(NormalizeError::TooLong);
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = url::Url::parse(&with_scheme).map_err(|_| NormalizeError::InvalidUrl)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(NormalizeError::InvalidUrl);
    }

    let post_id = post_path_regex()
        .captures(&with_scheme)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(NormalizeError::UnrecognizedPath)?;

    let username = raw_username.trim();
    let display_name = if username.is_empty() {
        UNKNOWN_DISPLAY_NAME.to_string()
    } else {
        username.to_string()
    };

    Ok(PostReference {
        raw_url: trimmed.to_string(),
        post_id,
        display_name,
    })
}
