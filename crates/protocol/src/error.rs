//! Protocol error types
//!
//! Errors that can occur when encoding, verifying or decoding wire messages
//! and when reading or writing replay files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during protocol operations
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Message is too short to contain required fields
    #[error("message too short: expected at least {expected} bytes, got {actual}")]
    MessageTooShort { expected: usize, actual: usize },

    /// Message exceeds the maximum accepted size
    #[error("message too large: {size} bytes exceeds maximum {max}")]
    MessageTooLarge { size: usize, max: usize },

    /// Invalid FlatBuffer format
    #[error("invalid flatbuffer: {0}")]
    InvalidFlatBuffer(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Root discriminant names no known record kind
    #[error("unknown message type: {0}")]
    UnknownMessageType(u8),

    /// Empty data payload
    #[error("empty data payload")]
    EmptyData,

    /// Replay file could not be read or written
    #[error("replay file {}: {source}", path.display())]
    Replay {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProtocolError {
    /// Create a message too short error
    #[inline]
    pub fn too_short(expected: usize, actual: usize) -> Self {
        Self::MessageTooShort { expected, actual }
    }

    /// Create a message too large error
    #[inline]
    pub fn message_too_large(size: usize, max: usize) -> Self {
        Self::MessageTooLarge { size, max }
    }

    /// Create an invalid flatbuffer error
    #[inline]
    pub fn invalid_flatbuffer(msg: impl Into<String>) -> Self {
        Self::InvalidFlatBuffer(msg.into())
    }

    /// Create a missing field error
    #[inline]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    /// Create a replay I/O error
    #[inline]
    pub fn replay(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Replay {
            path: path.into(),
            source,
        }
    }

    /// Check if this is a recoverable error (can continue processing)
    ///
    /// A record of an unknown kind or an empty payload does not poison the
    /// stream; structural damage does.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownMessageType(_) | Self::EmptyData)
    }
}
