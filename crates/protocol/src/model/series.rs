//! Correlation-keyed series records
//!
//! A subscription first delivers [`ReferenceData`] describing the series,
//! then a stream of macro events tagged with the same correlation id.

use super::measurement::same_f64;
use super::{EventKind, EventSubkind, Measurement, ReleaseStatus, TimeInterval};

/// Descriptive metadata for one tracked series
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    pub correlation_id: u64,
    pub global_id: String,
    pub short_id: String,
    pub description: String,
    pub frequency: String,
    pub units: String,
    pub country_iso: String,
    pub source: String,
    pub seasonality: String,
}

impl ReferenceData {
    /// All-defaults record carrying only the two required identifiers
    pub fn new(
        correlation_id: u64,
        global_id: impl Into<String>,
        short_id: impl Into<String>,
    ) -> Self {
        Self {
            correlation_id,
            global_id: global_id.into(),
            short_id: short_id.into(),
            ..Self::default()
        }
    }
}

/// A headline on a subscribed series, identified by correlation id only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacroHeadlineEvent {
    pub correlation_id: u64,
    pub kind: EventKind,
    pub subkind: EventSubkind,
    pub event_id: u64,
    pub observation_period: String,
    pub release: TimeInterval,
    pub prior_event_id: u64,
    pub prior_observation_period: String,
    pub prior_release: TimeInterval,
    pub value: Measurement,
}

impl MacroHeadlineEvent {
    /// All-defaults event for a correlation id
    pub fn new(correlation_id: u64) -> Self {
        Self {
            correlation_id,
            ..Self::default()
        }
    }
}

/// A calendar entry on a subscribed series
#[derive(Debug, Clone)]
pub struct MacroCalendarEvent {
    pub correlation_id: u64,
    pub global_id: String,
    pub short_id: String,
    pub kind: EventKind,
    pub subkind: EventSubkind,
    pub description: String,
    pub event_id: u64,
    pub observation_period: String,
    pub release: TimeInterval,
    pub release_status: ReleaseStatus,
    /// NaN when the feed gave no relevance score
    pub relevance: f64,
}

impl MacroCalendarEvent {
    /// All-defaults entry carrying only the required identifiers
    pub fn new(
        correlation_id: u64,
        global_id: impl Into<String>,
        short_id: impl Into<String>,
    ) -> Self {
        Self {
            correlation_id,
            global_id: global_id.into(),
            short_id: short_id.into(),
            ..Self::default()
        }
    }
}

impl Default for MacroCalendarEvent {
    fn default() -> Self {
        Self {
            correlation_id: 0,
            global_id: String::new(),
            short_id: String::new(),
            kind: EventKind::Unknown,
            subkind: EventSubkind::Unknown,
            description: String::new(),
            event_id: 0,
            observation_period: String::new(),
            release: TimeInterval::default(),
            release_status: ReleaseStatus::Unknown,
            relevance: f64::NAN,
        }
    }
}

impl PartialEq for MacroCalendarEvent {
    fn eq(&self, other: &Self) -> bool {
        self.correlation_id == other.correlation_id
            && self.global_id == other.global_id
            && self.short_id == other.short_id
            && self.kind == other.kind
            && self.subkind == other.subkind
            && self.description == other.description
            && self.event_id == other.event_id
            && self.observation_period == other.observation_period
            && self.release == other.release
            && self.release_status == other.release_status
            && same_f64(self.relevance, other.relevance)
    }
}
