//! Result export.

pub mod csv;

pub use self::csv::{write_errors_csv, write_success_csv};
