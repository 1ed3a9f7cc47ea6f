//! Pure markup/JSON parsing for the extraction strategies.
//!
//! Nothing here performs I/O; strategies feed rendered or fetched content in
//! and get timestamps (or nothing) back, which keeps these paths trivially
//! testable.

pub mod embedded;
pub mod time_tag;
