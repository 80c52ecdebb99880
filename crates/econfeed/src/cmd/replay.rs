//! Replay command - republish a capture directory
//!
//! Publishes every `fb_NNNNNN.bin` file in numeric order to a bus carrying
//! a reference map and a per-type counter, then reports what went through.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use econfeed_bus::{NotificationBus, ReferenceMap};
use econfeed_config::Config;
use econfeed_protocol::{replay, verify};
use econfeed_telemetry::TelemetryQueue;
use parking_lot::Mutex;
use tracing::{info, warn};

/// Replay command arguments
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Capture directory (defaults to [replay].dir)
    #[arg(short, long)]
    dir: Option<PathBuf>,
}

/// Outcome of a replay run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ReplaySummary {
    pub published: usize,
    pub rejected: usize,
    /// Published buffers per message type
    pub by_type: BTreeMap<&'static str, u64>,
    /// Reference entries still live after the replay
    pub references: usize,
}

/// Run the replay command
pub fn run(args: ReplayArgs, config: &Config) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| config.replay.dir.clone());
    let files = super::list_dir(&dir)?;
    info!(dir = %dir.display(), files = files.len(), "replaying");

    let bus = super::open_bus(config)?;
    let telemetry = super::start_telemetry(config)?;

    let summary = replay_files(&files, &bus, telemetry.as_ref());
    super::finish_telemetry(telemetry);

    let snapshot = bus.snapshot();
    println!("published: {}", summary.published);
    println!("rejected: {}", summary.rejected);
    for (message_type, count) in &summary.by_type {
        println!("  {message_type}: {count}");
    }
    println!("references: {}", summary.references);
    println!("observer failures: {}", snapshot.observer_failures);
    Ok(())
}

pub(crate) fn replay_files(
    files: &[PathBuf],
    bus: &NotificationBus,
    telemetry: Option<&TelemetryQueue>,
) -> ReplaySummary {
    let references = Arc::new(ReferenceMap::new());
    bus.register_shared(references.clone());

    let counts: Arc<Mutex<BTreeMap<&'static str, u64>>> = Arc::default();
    let counter = Arc::clone(&counts);
    bus.register(move |buffer: &[u8]| {
        if let Ok(message_type) = verify(buffer) {
            *counter.lock().entry(message_type.as_str()).or_insert(0) += 1;
        }
    });

    let mut summary = ReplaySummary::default();
    for path in files {
        let buffer = match replay::read_buffer(path) {
            Ok(buffer) => buffer,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read buffer");
                summary.rejected += 1;
                continue;
            }
        };
        let message_type = match verify(&buffer) {
            Ok(message_type) => message_type,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "buffer rejected");
                summary.rejected += 1;
                continue;
            }
        };

        let _span = telemetry.map(|queue| queue.span("replay", message_type.as_str()));
        bus.publish(&buffer);
        summary.published += 1;
    }

    summary.by_type = counts.lock().clone();
    summary.references = references.len();
    summary
}
