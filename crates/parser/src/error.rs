//! Parser error types

use thiserror::Error;

/// Errors that can occur while normalizing an element tree
#[derive(Debug, Error)]
pub enum ParseError {
    /// A required identifier is absent; no meaningful default exists
    #[error("{record}: missing required field {field}")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    /// The element names no record kind this parser knows
    #[error("unrecognized record element '{0}'")]
    UnknownRecord(String),
}

impl ParseError {
    /// Create a missing field error
    #[inline]
    pub fn missing_field(record: &'static str, field: &'static str) -> Self {
        Self::MissingField { record, field }
    }

    /// Create an unknown record error
    #[inline]
    pub fn unknown_record(name: impl Into<String>) -> Self {
        Self::UnknownRecord(name.into())
    }

    /// Check if the stream can simply skip this element
    ///
    /// Unknown record kinds are skipped; a record missing its identifiers is
    /// malformed input and is surfaced to the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownRecord(_))
    }
}
