//! Parser front end
//!
//! Wraps parse dispatch with the two side channels a feed adapter wires up:
//! anomalies and failures become System log records on the bus, and each
//! call is timed as a telemetry span.

use std::sync::Arc;

use econfeed_bus::NotificationBus;
use econfeed_protocol::{Message, Module, SystemStatus};
use econfeed_telemetry::{Span, TelemetryQueue};
use tracing::debug;

use crate::Result;
use crate::dispatch::{encode_with_notes, parse_with_notes};
use crate::element::Element;
use crate::fields::ParseNotes;

/// Telemetry module name for parser spans
const TELEMETRY_MODULE: &str = "parser";

/// Element parser with optional bus reporting and telemetry
#[derive(Debug, Default, Clone)]
pub struct Parser {
    bus: Option<Arc<NotificationBus>>,
    telemetry: Option<Arc<TelemetryQueue>>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report anomalies and failures as log records on `bus`, and publish
    /// processed buffers to it
    pub fn with_bus(mut self, bus: Arc<NotificationBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Time each call as a span on `queue`
    pub fn with_telemetry(mut self, queue: Arc<TelemetryQueue>) -> Self {
        self.telemetry = Some(queue);
        self
    }

    /// Parse an element into its record
    pub fn parse<E: Element>(&self, e: E, correlation_id: u64) -> Result<Message> {
        let _span = self.span(&e);
        let mut notes = ParseNotes::new();
        let result = parse_with_notes(e, correlation_id, &mut notes);
        self.report(&notes, correlation_id, result.as_ref().err());
        result
    }

    /// Encode an element straight to a wire buffer
    pub fn encode<E: Element>(&self, e: E, correlation_id: u64) -> Result<Vec<u8>> {
        let _span = self.span(&e);
        let mut notes = ParseNotes::new();
        let result = encode_with_notes(e, correlation_id, &mut notes);
        self.report(&notes, correlation_id, result.as_ref().err());
        result
    }

    /// Encode an element and publish the buffer on the bus
    ///
    /// Without a bus the buffer is discarded after encoding.
    pub fn process<E: Element>(&self, e: E, correlation_id: u64) -> Result<()> {
        let buffer = self.encode(e, correlation_id)?;
        if let Some(bus) = &self.bus {
            bus.publish(&buffer);
        }
        Ok(())
    }

    fn span<E: Element>(&self, e: &E) -> Option<Span<'_>> {
        self.telemetry
            .as_deref()
            .map(|queue| queue.span(TELEMETRY_MODULE, e.name()))
    }

    fn report(&self, notes: &ParseNotes, correlation_id: u64, error: Option<&crate::ParseError>) {
        if let Some(e) = error {
            debug!(error = %e, correlation_id, "element rejected");
        }
        let Some(bus) = &self.bus else {
            return;
        };

        for anomaly in notes.anomalies() {
            bus.log(Module::System, SystemStatus::Warning, correlation_id, anomaly.to_string());
        }
        if let Some(e) = error {
            bus.log(Module::System, SystemStatus::Error, correlation_id, e.to_string());
        }
    }
}
