//! DTO → view model mappers
//!
//! Pure functions. Required data that is missing or malformed yields
//! `ClientError::InvalidResponse`; optional data falls back to defaults.

mod catalog;
mod content;
mod request;
mod stats;
pub mod time;

pub use catalog::*;
pub use content::*;
pub use request::*;
pub use stats::*;

/// Trimmed, non-empty string or `None`
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
