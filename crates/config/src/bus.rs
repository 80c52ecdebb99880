//! `[bus]` and `[replay]` sections

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ConfigError;

/// Where the bus writes text lines when no observer is registered
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FallbackOutput {
    #[default]
    Stdout,
    Stderr,
    /// Append to a file
    #[serde(untagged)]
    File(String),
}

impl FallbackOutput {
    /// File path when falling back to a file
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(Path::new(path)),
            Self::Stdout | Self::Stderr => None,
        }
    }
}

/// Notification bus configuration
///
/// ```toml
/// [bus]
/// fallback = "stderr"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    pub fallback: FallbackOutput,
}

impl BusConfig {
    pub(crate) fn validate(&self) -> crate::Result<()> {
        if let FallbackOutput::File(path) = &self.fallback
            && path.trim().is_empty()
        {
            return Err(ConfigError::missing_field("bus", "fallback"));
        }
        Ok(())
    }
}

/// Replay directory configuration
///
/// ```toml
/// [replay]
/// dir = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Directory holding `fb_NNNNNN.bin` buffers
    pub dir: PathBuf,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("debug"),
        }
    }
}

impl ReplayConfig {
    pub(crate) fn validate(&self) -> crate::Result<()> {
        if self.dir.as_os_str().is_empty() {
            return Err(ConfigError::missing_field("replay", "dir"));
        }
        Ok(())
    }
}
