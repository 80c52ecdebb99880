//! econfeed telemetry - bounded, non-blocking profiler queue.
//!
//! Instrumentation points push short fixed-size records from any thread;
//! a single background writer appends them to a file:
//!
//! - **Non-blocking**: a push holds the lock for one slot copy and never waits
//! - **Drop on overflow**: a full ring drops the newest record and returns id 0
//! - **Paired records**: `span()` ties a start and end record to one id
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  push   ┌──────────────┐  pop (1/lock)  ┌──────────────┐
//! │  Producers  │────────▶│  Ring (128)  │───────────────▶│ Writer thread│
//! │ (any thread)│         │  + Condvar   │                │ append+flush │
//! └─────────────┘         └──────────────┘                └──────────────┘
//! ```
//!
//! # File format
//!
//! One line per record: `micros|event_id|module|metric|message`, where
//! `micros` is the wall clock at write time.
//!
//! # Usage
//!
//! ```rust,no_run
//! use econfeed_telemetry::{QueueConfig, TelemetryQueue};
//!
//! let queue = TelemetryQueue::start(QueueConfig::new("profile.log"))?;
//! {
//!     let _span = queue.span("parser", "economic_event");
//!     // measured work
//! }
//! queue.stop();
//! # Ok::<(), econfeed_telemetry::TelemetryError>(())
//! ```

mod error;
mod event;
mod metrics;
mod queue;
mod ring;
mod span;

pub use error::TelemetryError;
pub use event::{EventMessage, FixedStr, MetricName, ModuleName, TelemetryEvent};
pub use metrics::{QueueMetrics, QueueSnapshot};
pub use queue::{DEFAULT_CAPACITY, DEFAULT_INTERVAL, QueueConfig, TelemetryQueue};
pub use span::Span;

/// Result type for telemetry operations
pub type Result<T> = std::result::Result<T, TelemetryError>;
