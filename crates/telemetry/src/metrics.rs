//! Telemetry queue metrics
//!
//! Relaxed atomic counters; values may be slightly stale when read.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct QueueMetrics {
    /// Events accepted into the ring
    accepted: AtomicU64,

    /// Events dropped because the ring was full or the queue stopped
    dropped: AtomicU64,

    /// Lines appended to the telemetry file
    written: AtomicU64,

    /// Lines lost to write errors
    write_errors: AtomicU64,
}

impl QueueMetrics {
    pub const fn new() -> Self {
        Self {
            accepted: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            written: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_written(&self) {
        self.written.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            accepted: self.accepted.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            written: self.written.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of queue metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub accepted: u64,
    pub dropped: u64,
    pub written: u64,
    pub write_errors: u64,
}

impl QueueSnapshot {
    /// Accepted events not yet written or lost
    pub fn pending(&self) -> u64 {
        self.accepted
            .saturating_sub(self.written)
            .saturating_sub(self.write_errors)
    }
}
