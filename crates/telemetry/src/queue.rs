//! Async telemetry queue
//!
//! Producers copy a record into a fixed ring under a short lock and return
//! at once. A single writer thread pops one record at a time and appends it
//! to the telemetry file with the lock released.
//!
//! # Shutdown
//!
//! `stop()` is idempotent and terminal. The writer drains every record that
//! was queued before it exits; pushes after `stop()` are dropped.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, warn};

use crate::error::TelemetryError;
use crate::event::TelemetryEvent;
use crate::metrics::{QueueMetrics, QueueSnapshot};
use crate::ring::Ring;
use crate::span::Span;
use crate::Result;

/// Default ring capacity
pub const DEFAULT_CAPACITY: usize = 128;

/// Default writer wake interval
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(10);

/// Telemetry queue settings
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Append-only output file
    pub path: PathBuf,

    /// Ring slots, fixed for the queue's lifetime
    pub capacity: usize,

    /// Longest the writer sleeps between checks when idle
    pub interval: Duration,
}

impl QueueConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            capacity: DEFAULT_CAPACITY,
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(TelemetryError::invalid_config("capacity must be greater than zero"));
        }
        if self.interval.is_zero() {
            return Err(TelemetryError::invalid_config("interval must be greater than zero"));
        }
        if self.path.as_os_str().is_empty() {
            return Err(TelemetryError::invalid_config("path must not be empty"));
        }
        Ok(())
    }
}

struct State {
    ring: Ring,
    next_id: u64,
    running: bool,
}

struct Shared {
    state: Mutex<State>,
    wake: Condvar,
    interval: Duration,
    metrics: QueueMetrics,
}

/// Bounded, non-blocking telemetry queue with a background file writer
pub struct TelemetryQueue {
    shared: Arc<Shared>,
    writer: Mutex<Option<JoinHandle<()>>>,
}

impl TelemetryQueue {
    /// Open the telemetry file for append and start the writer thread
    pub fn start(config: QueueConfig) -> Result<Self> {
        config.validate()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.path)
            .map_err(|e| TelemetryError::open(&config.path, e))?;

        let queue = Self::idle(&config);
        queue.spawn_writer(file)?;

        debug!(
            path = %config.path.display(),
            capacity = config.capacity,
            interval_ms = config.interval.as_millis() as u64,
            "telemetry queue started"
        );
        Ok(queue)
    }

    /// Queue with no writer attached yet
    pub(crate) fn idle(config: &QueueConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    ring: Ring::with_capacity(config.capacity),
                    next_id: 1,
                    running: true,
                }),
                wake: Condvar::new(),
                interval: config.interval,
                metrics: QueueMetrics::new(),
            }),
            writer: Mutex::new(None),
        }
    }

    pub(crate) fn spawn_writer(&self, file: File) -> Result<()> {
        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name("econfeed-telemetry".into())
            .spawn(move || shared.run(BufWriter::new(file)))
            .map_err(TelemetryError::Spawn)?;
        *self.writer.lock() = Some(handle);
        Ok(())
    }

    /// Queue one record without blocking
    ///
    /// An `event_id` of 0 takes the next id from the queue's counter; any
    /// other id is echoed. Returns 0 when the event was dropped because the
    /// ring is full or the queue has stopped.
    pub fn push(&self, module: &str, metric: &str, message: &str, event_id: u64) -> u64 {
        let mut event = TelemetryEvent::new(module, metric, message, event_id);

        let mut state = self.shared.state.lock();
        if !state.running || state.ring.is_full() {
            drop(state);
            self.shared.metrics.record_dropped();
            return 0;
        }

        if event.event_id == 0 {
            event.event_id = state.next_id;
            state.next_id += 1;
        }
        let id = event.event_id;
        // Cannot fail: fullness was checked under the same lock
        let _ = state.ring.push(event);
        drop(state);

        self.shared.metrics.record_accepted();
        self.shared.wake.notify_one();
        id
    }

    /// Start a measured operation; the end record is pushed on drop
    pub fn span(&self, module: &str, metric: &str) -> Span<'_> {
        Span::begin(self, module, metric)
    }

    /// Records waiting for the writer
    pub fn len(&self) -> usize {
        self.shared.state.lock().ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.shared.state.lock().ring.capacity()
    }

    pub fn is_running(&self) -> bool {
        self.shared.state.lock().running
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        self.shared.metrics.snapshot()
    }

    /// Stop accepting records, drain the ring and join the writer
    ///
    /// Safe to call more than once.
    pub fn stop(&self) {
        self.shared.state.lock().running = false;
        self.shared.wake.notify_all();

        let Some(handle) = self.writer.lock().take() else {
            return;
        };
        if handle.join().is_err() {
            warn!("telemetry writer panicked");
        }

        let snapshot = self.snapshot();
        debug!(
            written = snapshot.written,
            dropped = snapshot.dropped,
            "telemetry queue stopped"
        );
    }
}

impl Drop for TelemetryQueue {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for TelemetryQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryQueue")
            .field("interval", &self.shared.interval)
            .field("metrics", &self.snapshot())
            .finish()
    }
}

impl Shared {
    /// Writer loop: one record per lock acquisition, I/O outside the lock
    fn run<W: Write>(&self, mut out: W) {
        loop {
            let event = {
                let mut state = self.state.lock();
                loop {
                    if let Some(event) = state.ring.pop() {
                        break Some(event);
                    }
                    if !state.running {
                        break None;
                    }
                    self.wake.wait_for(&mut state, self.interval);
                }
            };

            let Some(event) = event else {
                break;
            };
            self.write(&mut out, &event);
        }
    }

    fn write<W: Write>(&self, out: &mut W, event: &TelemetryEvent) {
        let micros = chrono::Utc::now().timestamp_micros();
        let line = event.to_line(micros);

        match writeln!(out, "{line}").and_then(|()| out.flush()) {
            Ok(()) => self.metrics.record_written(),
            Err(e) => {
                self.metrics.record_write_error();
                warn!(error = %e, event_id = event.event_id, "failed to write telemetry line");
            }
        }
    }
}
