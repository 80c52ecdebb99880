//! econfeed bus - observer fan-out for encoded records
//!
//! Producers hand encoded buffers to a [`NotificationBus`]; it delivers
//! each buffer to every registered [`Observer`] in registration order, or,
//! when nobody is listening, renders it as one text line on a fallback sink.
//!
//! ```text
//! encode ──▶ publish ──┬──▶ observer A ──▶ observer B ──▶ ...
//!                      └──▶ (none registered) render ──▶ fallback sink
//! ```
//!
//! - `log()` builds, encodes and publishes a [`LogRecord`](econfeed_protocol::LogRecord),
//!   dropping records for the suppressed module
//! - [`ReferenceMap`] joins macro events with their series reference data
//! - [`render`] holds the fallback line formats
//!
//! There is no process-wide bus: construct one and share it with `Arc`.

mod bus;
mod error;
mod metrics;
mod observer;
mod reference;
pub mod render;

pub use bus::{FallbackTarget, NotificationBus};
pub use error::BusError;
pub use metrics::{BusMetrics, BusSnapshot};
pub use observer::Observer;
pub use reference::{EnrichedEvent, ReferenceMap};

/// Result type for bus operations
pub type Result<T> = std::result::Result<T, BusError>;

#[cfg(test)]
mod bus_test;
