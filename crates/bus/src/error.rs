//! Bus error types
//!
//! Publishing never fails; only setting up the fallback sink can.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a notification bus
#[derive(Debug, Error)]
pub enum BusError {
    /// Fallback file could not be opened for append
    #[error("failed to open fallback sink {path}: {source}")]
    OpenFallback {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BusError {
    pub fn open_fallback(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::OpenFallback {
            path: path.into(),
            source,
        }
    }
}
