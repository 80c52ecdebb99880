//! Notification bus
//!
//! Fans each encoded buffer out to the registered observers in registration
//! order. With no observers registered, each buffer becomes one rendered
//! line on the fallback sink instead.
//!
//! # Thread Safety
//!
//! `publish` and `log` may be called from any thread. The observer list is
//! copy-on-write: publishing takes a cheap snapshot and never holds a lock
//! while observers run, so an observer may register another. Fallback writes
//! are serialized so lines never interleave.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use econfeed_protocol::{Encode, LogRecord, Module};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::Result;
use crate::error::BusError;
use crate::metrics::{BusMetrics, BusSnapshot};
use crate::observer::Observer;
use crate::render;

/// Where unobserved buffers are rendered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FallbackTarget {
    #[default]
    Stdout,
    Stderr,
    /// Append to a file
    File(PathBuf),
}

impl FallbackTarget {
    fn open(&self) -> Result<Box<dyn Write + Send>> {
        Ok(match self {
            Self::Stdout => Box::new(io::stdout()),
            Self::Stderr => Box::new(io::stderr()),
            Self::File(path) => Box::new(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| BusError::open_fallback(path, e))?,
            ),
        })
    }
}

/// Ordered observer fan-out with a text fallback
pub struct NotificationBus {
    observers: RwLock<Arc<[Arc<dyn Observer>]>>,
    fallback: Mutex<Box<dyn Write + Send>>,
    metrics: BusMetrics,
}

impl NotificationBus {
    /// Bus rendering unobserved buffers to stdout
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Bus rendering unobserved buffers to `target`
    pub fn with_target(target: &FallbackTarget) -> Result<Self> {
        Ok(Self::with_boxed_writer(target.open()?))
    }

    /// Bus rendering unobserved buffers to any writer
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self::with_boxed_writer(Box::new(writer))
    }

    fn with_boxed_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            observers: RwLock::new(Arc::from(Vec::new())),
            fallback: Mutex::new(writer),
            metrics: BusMetrics::new(),
        }
    }

    /// Append an observer; duplicates are kept and delivered twice
    pub fn register(&self, observer: impl Observer + 'static) {
        self.register_shared(Arc::new(observer));
    }

    /// Append an observer the caller keeps a handle to
    pub fn register_shared(&self, observer: Arc<dyn Observer>) {
        let mut observers = self.observers.write();
        let mut next = observers.to_vec();
        next.push(observer);
        *observers = Arc::from(next);
        debug!(observers = observers.len(), "observer registered");
    }

    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    /// Deliver a buffer to every observer, or render it to the fallback
    ///
    /// A panicking observer is counted and skipped; later observers still
    /// receive the buffer.
    pub fn publish(&self, buffer: &[u8]) {
        self.metrics.record_publish();

        let observers = Arc::clone(&self.observers.read());
        if observers.is_empty() {
            self.write_fallback(buffer);
            return;
        }

        for (index, observer) in observers.iter().enumerate() {
            let delivered = panic::catch_unwind(AssertUnwindSafe(|| observer.notify(buffer)));
            match delivered {
                Ok(()) => self.metrics.record_delivery(),
                Err(_) => {
                    self.metrics.record_observer_failure();
                    warn!(observer = index, bytes = buffer.len(), "observer panicked during delivery");
                }
            }
        }
    }

    /// Stamp, encode and publish a log record
    ///
    /// Records for [`Module::Unknown`] are dropped before encoding.
    pub fn log(
        &self,
        module: Module,
        status: impl Into<u8>,
        correlation_id: u64,
        message: impl Into<String>,
    ) {
        if module.is_suppressed() {
            self.metrics.record_suppressed();
            return;
        }
        let record = LogRecord::new(module, status, correlation_id, message);
        self.publish(&record.encode());
    }

    pub fn snapshot(&self) -> BusSnapshot {
        self.metrics.snapshot()
    }

    fn write_fallback(&self, buffer: &[u8]) {
        let line = render::render(buffer);

        let mut out = self.fallback.lock();
        match writeln!(out, "{line}").and_then(|()| out.flush()) {
            Ok(()) => self.metrics.record_fallback_line(),
            Err(e) => {
                self.metrics.record_fallback_error();
                warn!(error = %e, "failed to write fallback line");
            }
        }
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("observers", &self.observer_count())
            .field("metrics", &self.snapshot())
            .finish()
    }
}
