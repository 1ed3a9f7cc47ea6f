//! Configuration constants.
//!
//! This module defines the constants used throughout the pipeline:
//! delay ranges, timeouts, the post-URL pattern, and the default
//! embedded-data key path.

use std::time::Duration;

/// Per-request HTTP timeout in seconds (structured-API lookups).
pub const HTTP_TIMEOUT_SECS: u64 = 15;

/// Page render timeout in seconds.
///
/// Covers browser launch, navigation, scroll pauses, and content capture.
/// Navigation alone rarely exceeds 30s; the rest is scroll pacing.
pub const RENDER_TIMEOUT_SECS: u64 = 90;

/// Number of simulated scroll actions per rendered page.
pub const SCROLL_COUNT: usize = 3;

/// Delay range between batch items.
///
/// The original pipeline slept a fixed 12 seconds per post; a fixed interval
/// is detectable, so the default range straddles it.
pub const BATCH_ITEM_DELAY: (Duration, Duration) =
    (Duration::from_secs(8), Duration::from_secs(14));

/// Delay range before a structured-API lookup.
pub const API_LOOKUP_DELAY: (Duration, Duration) =
    (Duration::from_secs(2), Duration::from_secs(5));

/// Delay range before a page load in the browser session.
pub const PAGE_LOAD_DELAY: (Duration, Duration) =
    (Duration::from_secs(3), Duration::from_secs(6));

/// Pause range between simulated scroll actions.
pub const SCROLL_PAUSE: (Duration, Duration) =
    (Duration::from_millis(500), Duration::from_millis(2000));

/// Maximum input URL length.
///
/// Matches common browser and server limits; longer values are rejected as
/// malformed rather than passed to the pattern match.
pub const MAX_URL_LENGTH: usize = 2048;

/// Pattern recognizing the three known post-path shapes.
///
/// Captures the shortcode between the path-type segment and the next
/// delimiter (`/`, `?`, or `#`).
pub const POST_PATH_PATTERN: &str = r"/(?:p|reel|tv)/([^/?#]+)";

/// Default User-Agent string for both the HTTP client and the browser session.
///
/// A realistic desktop Chrome identity; overridable via `--user-agent`.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Sentinel identity for rows without a username column.
pub const UNKNOWN_DISPLAY_NAME: &str = "unknown";

/// Default pattern for the embedded JSON callback payload.
///
/// Targets the legacy `window.__additionalDataLoaded('<path>', {...});`
/// shape. The payload shape is treated as a configurable detail, not a
/// contract: see [`crate::strategies::EmbeddedBlobConfig`].
pub const EMBEDDED_CALLBACK_PATTERN: &str =
    r"window\.__additionalDataLoaded\s*\(\s*[^,]+,\s*(\{.*?\})\s*\)\s*;";

/// Default key path from the embedded payload root to the epoch-seconds
/// publication timestamp. Numeric segments index into arrays.
pub const EMBEDDED_KEY_PATH: &str = "items.0.taken_at";
