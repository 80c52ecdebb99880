//! Reference data join
//!
//! A subscription delivers one [`ReferenceData`] record and then a stream
//! of macro events tagged with the same correlation id. [`ReferenceMap`]
//! keeps the latest reference per correlation id so consumers can join the
//! two, and forgets it once the subscription ends.

use std::collections::HashMap;

use econfeed_protocol::{
    LogRecord, MacroCalendarEvent, MacroHeadlineEvent, Message, Module, ReferenceData,
    SubscriptionStatus, decode_message,
};
use parking_lot::RwLock;
use tracing::debug;

use crate::observer::Observer;

/// A macro event joined with its series reference
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedEvent<T> {
    pub event: T,
    /// Defaults (empty text, same correlation id) when none was stored
    pub reference: ReferenceData,
}

/// Reference data keyed by correlation id
#[derive(Debug, Default)]
pub struct ReferenceMap {
    entries: RwLock<HashMap<u64, ReferenceData>>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace the reference for its correlation id
    pub fn add(&self, data: ReferenceData) {
        self.entries.write().insert(data.correlation_id, data);
    }

    pub fn get(&self, correlation_id: u64) -> Option<ReferenceData> {
        self.entries.read().get(&correlation_id).cloned()
    }

    pub fn remove(&self, correlation_id: u64) -> Option<ReferenceData> {
        self.entries.write().remove(&correlation_id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop the entry of a subscription reported terminated or failed
    ///
    /// Returns true if an entry was removed.
    pub fn observe_log(&self, record: &LogRecord) -> bool {
        if record.module != Module::Subscription {
            return false;
        }
        let ended = matches!(
            SubscriptionStatus::from_u8(record.status),
            SubscriptionStatus::Terminated | SubscriptionStatus::Failure
        );
        if !ended {
            return false;
        }

        let removed = self.remove(record.correlation_id).is_some();
        if removed {
            debug!(
                correlation_id = record.correlation_id,
                status = record.status_name(),
                "reference dropped for ended subscription"
            );
        }
        removed
    }

    fn reference_for(&self, correlation_id: u64) -> ReferenceData {
        self.get(correlation_id).unwrap_or_else(|| ReferenceData {
            correlation_id,
            ..ReferenceData::default()
        })
    }

    pub fn enrich_headline(&self, event: MacroHeadlineEvent) -> EnrichedEvent<MacroHeadlineEvent> {
        let reference = self.reference_for(event.correlation_id);
        EnrichedEvent { event, reference }
    }

    pub fn enrich_calendar(&self, event: MacroCalendarEvent) -> EnrichedEvent<MacroCalendarEvent> {
        let reference = self.reference_for(event.correlation_id);
        EnrichedEvent { event, reference }
    }
}

/// Keeps itself current from the published stream
///
/// Reference records are stored and subscription end logs evict; every
/// other record is ignored.
impl Observer for ReferenceMap {
    fn notify(&self, buffer: &[u8]) {
        match decode_message(buffer) {
            Ok(Message::Reference(data)) => self.add(data),
            Ok(Message::Log(record)) => {
                self.observe_log(&record);
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "reference map skipped undecodable buffer"),
        }
    }
}
