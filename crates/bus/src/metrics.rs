//! Notification bus metrics
//!
//! Relaxed atomic counters, safe to bump from any publishing thread.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct BusMetrics {
    /// Buffers handed to `publish`
    publishes: AtomicU64,

    /// Successful observer calls
    deliveries: AtomicU64,

    /// Observer calls that panicked
    observer_failures: AtomicU64,

    /// Lines written to the fallback sink
    fallback_lines: AtomicU64,

    /// Fallback writes that failed
    fallback_errors: AtomicU64,

    /// Log records dropped for the suppressed module
    suppressed_logs: AtomicU64,
}

impl BusMetrics {
    pub const fn new() -> Self {
        Self {
            publishes: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            observer_failures: AtomicU64::new(0),
            fallback_lines: AtomicU64::new(0),
            fallback_errors: AtomicU64::new(0),
            suppressed_logs: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_publish(&self) {
        self.publishes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_delivery(&self) {
        self.deliveries.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_observer_failure(&self) {
        self.observer_failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_fallback_line(&self) {
        self.fallback_lines.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_fallback_error(&self) {
        self.fallback_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_suppressed(&self) {
        self.suppressed_logs.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> BusSnapshot {
        BusSnapshot {
            publishes: self.publishes.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            observer_failures: self.observer_failures.load(Ordering::Relaxed),
            fallback_lines: self.fallback_lines.load(Ordering::Relaxed),
            fallback_errors: self.fallback_errors.load(Ordering::Relaxed),
            suppressed_logs: self.suppressed_logs.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of bus metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusSnapshot {
    pub publishes: u64,
    pub deliveries: u64,
    pub observer_failures: u64,
    pub fallback_lines: u64,
    pub fallback_errors: u64,
    pub suppressed_logs: u64,
}
