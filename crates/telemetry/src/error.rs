//! Telemetry error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while starting the telemetry queue.
///
/// Pushing never fails: a full queue drops the event and reports it through
/// the returned id and the metrics.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Queue settings rejected before anything was opened
    #[error("invalid telemetry config: {0}")]
    InvalidConfig(String),

    /// Telemetry file could not be opened for append
    #[error("failed to open telemetry file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writer thread could not be spawned
    #[error("failed to spawn telemetry writer: {0}")]
    Spawn(#[source] io::Error),
}

impl TelemetryError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }
}
