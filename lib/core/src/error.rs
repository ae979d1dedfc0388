//! Error handling foundation for the aula-movil client.
//!
//! This module provides the `Result` type alias using rootcause plus the
//! shared parse error for strongly-typed IDs. Each crate defines its own
//! domain-specific error types in their own error modules, using
//! rootcause's `.context()` to add layer-appropriate context as errors
//! propagate up the stack.

use rootcause::Report;
use std::fmt;

/// A Result type alias using rootcause's Report for error handling.
///
/// Each layer adds its own context via `.context()` as errors propagate.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}
