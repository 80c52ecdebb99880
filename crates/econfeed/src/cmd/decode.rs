//! Decode command - render encoded buffers as text lines
//!
//! Every buffer is verified first; valid ones go through a bus with no
//! observers, so each becomes one fallback line.
//!
//! # Usage
//!
//! ```bash
//! econfeed decode debug/fb_000001.bin      # one file
//! econfeed decode debug/                   # every replay file, in order
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Args;
use econfeed_bus::NotificationBus;
use econfeed_config::Config;
use econfeed_protocol::{replay, verify};
use econfeed_telemetry::TelemetryQueue;
use tracing::{debug, warn};

/// Decode command arguments
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Buffer files, or directories of replay files
    #[arg(value_name = "PATHS", required = true)]
    inputs: Vec<PathBuf>,
}

/// Outcome of a decode run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DecodeSummary {
    pub rendered: usize,
    pub rejected: usize,
}

/// Run the decode command
pub fn run(args: DecodeArgs, config: &Config) -> Result<()> {
    let files = super::collect_inputs(&args.inputs)?;
    let bus = super::open_bus(config)?;
    let telemetry = super::start_telemetry(config)?;

    let summary = decode_files(&files, &bus, telemetry.as_ref());
    super::finish_telemetry(telemetry);

    eprintln!(
        "Decoded {} buffer(s), rejected {}",
        summary.rendered, summary.rejected
    );
    if summary.rejected > 0 {
        bail!("{} buffer(s) failed verification", summary.rejected);
    }
    Ok(())
}

pub(crate) fn decode_files(
    files: &[PathBuf],
    bus: &NotificationBus,
    telemetry: Option<&TelemetryQueue>,
) -> DecodeSummary {
    let mut summary = DecodeSummary::default();
    for path in files {
        if decode_file(path, bus, telemetry) {
            summary.rendered += 1;
        } else {
            summary.rejected += 1;
        }
    }
    summary
}

fn decode_file(path: &Path, bus: &NotificationBus, telemetry: Option<&TelemetryQueue>) -> bool {
    let buffer = match replay::read_buffer(path) {
        Ok(buffer) => buffer,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read buffer");
            return false;
        }
    };

    let message_type = match verify(&buffer) {
        Ok(message_type) => message_type,
        Err(e) => {
            warn!(path = %path.display(), bytes = buffer.len(), error = %e, "buffer rejected");
            return false;
        }
    };

    let _span = telemetry.map(|queue| queue.span("decode", message_type.as_str()));
    debug!(path = %path.display(), message_type = message_type.as_str(), "rendering");
    bus.publish(&buffer);
    true
}
