//! econfeed configuration
//!
//! TOML-based configuration loading with defaults for every section, so an
//! empty file (or no file at all) is a working configuration.
//!
//! ```
//! use econfeed_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[telemetry]\nenabled = true").unwrap();
//! assert!(config.telemetry.enabled);
//! ```
//!
//! # Example Full Config
//!
//! ```toml
//! [log]
//! level = "debug"
//! format = "json"
//! output = "stderr"
//!
//! [bus]
//! fallback = "feed.log"
//!
//! [telemetry]
//! enabled = true
//! path = "telemetry.log"
//! capacity = 128
//! interval = "10ms"
//!
//! [replay]
//! dir = "debug"
//! ```

mod bus;
mod error;
mod logging;
mod telemetry;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use bus::{BusConfig, FallbackOutput, ReplayConfig};
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel, LogOutput};
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Diagnostic logging of the tools
    pub log: LogConfig,

    /// Notification bus fallback output
    pub bus: BusConfig,

    /// Profiling queue
    pub telemetry: TelemetryConfig,

    /// Replay buffer directory
    pub replay: ReplayConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, contains invalid TOML or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.log.validate()?;
        self.bus.validate()?;
        self.telemetry.validate()?;
        self.replay.validate()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
