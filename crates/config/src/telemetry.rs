//! `[telemetry]` section
//!
//! Profiling records pushed by the parser are drained by a background
//! thread into an append-only file. Disabled by default.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::ConfigError;

/// Telemetry queue configuration
///
/// ```toml
/// [telemetry]
/// enabled = true
/// path = "telemetry.log"
/// capacity = 128
/// interval = "10ms"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,

    /// Append-only output file
    pub path: PathBuf,

    /// Ring slots; pushes beyond this are dropped
    pub capacity: usize,

    /// Longest the writer sleeps between drains
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("telemetry.log"),
            capacity: 128,
            interval: Duration::from_millis(10),
        }
    }
}

impl TelemetryConfig {
    pub(crate) fn validate(&self) -> crate::Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::missing_field("telemetry", "path"));
        }
        if self.capacity == 0 {
            return Err(ConfigError::invalid_value(
                "telemetry",
                "capacity",
                "must be greater than 0",
            ));
        }
        if self.interval.is_zero() {
            return Err(ConfigError::invalid_value(
                "telemetry",
                "interval",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.capacity, 128);
        assert_eq!(config.interval, Duration::from_millis(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
enabled = true
path = "/var/log/econfeed/profile.log"
capacity = 512
interval = "250ms"
"#;
        let config: TelemetryConfig = toml::from_str(toml).unwrap();
        assert!(config.enabled);
        assert_eq!(config.path, PathBuf::from("/var/log/econfeed/profile.log"));
        assert_eq!(config.capacity, 512);
        assert_eq!(config.interval, Duration::from_millis(250));
    }

    #[test]
    fn test_deserialize_interval_variants() {
        for (s, expected) in [
            ("1ms", Duration::from_millis(1)),
            ("1s", Duration::from_secs(1)),
            ("1m", Duration::from_secs(60)),
        ] {
            let toml = format!("interval = \"{}\"", s);
            let config: TelemetryConfig = toml::from_str(&toml).unwrap();
            assert_eq!(config.interval, expected, "Failed for {}", s);
        }
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config: TelemetryConfig = toml::from_str("capacity = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config: TelemetryConfig = toml::from_str(r#"interval = "0s""#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_path_rejected() {
        let config: TelemetryConfig = toml::from_str(r#"path = """#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { field: "path", .. })
        ));
    }
}
