//! CLI command implementations

pub mod decode;
pub mod replay;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use econfeed_bus::{FallbackTarget, NotificationBus};
use econfeed_config::{Config, FallbackOutput};
use econfeed_protocol::replay as replay_files;
use econfeed_telemetry::{QueueConfig, TelemetryQueue};
use tracing::info;

/// Bus writing unobserved buffers where `[bus]` says
pub(crate) fn open_bus(config: &Config) -> Result<NotificationBus> {
    let target = match &config.bus.fallback {
        FallbackOutput::Stdout => FallbackTarget::Stdout,
        FallbackOutput::Stderr => FallbackTarget::Stderr,
        FallbackOutput::File(path) => FallbackTarget::File(PathBuf::from(path)),
    };
    NotificationBus::with_target(&target).context("failed to open bus fallback output")
}

/// Profiling queue, when `[telemetry]` enables it
pub(crate) fn start_telemetry(config: &Config) -> Result<Option<TelemetryQueue>> {
    let telemetry = &config.telemetry;
    if !telemetry.enabled {
        return Ok(None);
    }

    let queue_config = QueueConfig::new(&telemetry.path)
        .with_capacity(telemetry.capacity)
        .with_interval(telemetry.interval);
    let queue = TelemetryQueue::start(queue_config).with_context(|| {
        format!("failed to start telemetry at {}", telemetry.path.display())
    })?;

    info!(path = %telemetry.path.display(), capacity = telemetry.capacity, "telemetry enabled");
    Ok(Some(queue))
}

/// Expand inputs into buffer files: files as given, directories as their
/// replay files in numeric order
pub(crate) fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(list_dir(input)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

pub(crate) fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    replay_files::list_files(dir)
        .with_context(|| format!("failed to list replay files in {}", dir.display()))
}

/// Log the final queue counters and stop the writer
pub(crate) fn finish_telemetry(queue: Option<TelemetryQueue>) {
    if let Some(queue) = queue {
        queue.stop();
        let snapshot = queue.snapshot();
        info!(
            accepted = snapshot.accepted,
            dropped = snapshot.dropped,
            written = snapshot.written,
            write_errors = snapshot.write_errors,
            "telemetry stopped"
        );
    }
}
