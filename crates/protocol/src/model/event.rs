//! Headline events
//!
//! Economic releases and calendar entries share one [`HeadlineBase`],
//! embedded by value in each concrete record.

use super::{Measurement, TimeInterval};

/// What an economic headline reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventKind {
    #[default]
    Unknown = 0,
    Actual = 1,
    Revision = 2,
    Estimate = 3,
    Calendar = 4,
}

impl EventKind {
    /// Parse from raw byte value
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Actual,
            2 => Self::Revision,
            3 => Self::Estimate,
            4 => Self::Calendar,
            _ => Self::Unknown,
        }
    }

    /// Convert to raw byte value
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parse the feed's upper-case label; anything else is `Unknown`
    pub fn parse(s: &str) -> Self {
        match s {
            "ACTUAL" => Self::Actual,
            "REVISION" => Self::Revision,
            "ESTIMATE" => Self::Estimate,
            "CALENDAR" => Self::Calendar,
            _ => Self::Unknown,
        }
    }

    /// Label as the feed spells it
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Actual => "ACTUAL",
            Self::Revision => "REVISION",
            Self::Estimate => "ESTIMATE",
            Self::Calendar => "CALENDAR",
        }
    }
}

/// How a headline relates to earlier ones for the same event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventSubkind {
    #[default]
    Unknown = 0,
    New = 1,
    Update = 2,
    InitialPaint = 3,
    Delete = 4,
}

impl EventSubkind {
    /// Parse from raw byte value
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::New,
            2 => Self::Update,
            3 => Self::InitialPaint,
            4 => Self::Delete,
            _ => Self::Unknown,
        }
    }

    /// Convert to raw byte value
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parse the feed's upper-case label; anything else is `Unknown`
    pub fn parse(s: &str) -> Self {
        match s {
            "NEW" => Self::New,
            "UPDATE" => Self::Update,
            "INITPAINT" => Self::InitialPaint,
            "DELETE" => Self::Delete,
            _ => Self::Unknown,
        }
    }

    /// Label as the feed spells it
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::New => "NEW",
            Self::Update => "UPDATE",
            Self::InitialPaint => "INITPAINT",
            Self::Delete => "DELETE",
        }
    }
}

/// Whether a calendar entry has been published yet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ReleaseStatus {
    #[default]
    Unknown = 0,
    Released = 1,
    Scheduled = 2,
}

impl ReleaseStatus {
    /// Parse from raw byte value
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Released,
            2 => Self::Scheduled,
            _ => Self::Unknown,
        }
    }

    /// Convert to raw byte value
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parse the feed's upper-case label; anything else is `Unknown`
    pub fn parse(s: &str) -> Self {
        match s {
            "RELEASED" => Self::Released,
            "SCHEDULED" => Self::Scheduled,
            _ => Self::Unknown,
        }
    }

    /// Label as the feed spells it
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Released => "RELEASED",
            Self::Scheduled => "SCHEDULED",
        }
    }
}

/// Fields shared by every headline record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlineBase {
    pub global_id: String,
    pub short_id: String,
    pub description: String,
    pub kind: EventKind,
    pub subkind: EventSubkind,
    pub event_id: u64,
    pub observation_period: String,
    pub release: TimeInterval,
}

impl HeadlineBase {
    /// All-defaults base carrying only the two required identifiers
    pub fn new(global_id: impl Into<String>, short_id: impl Into<String>) -> Self {
        Self {
            global_id: global_id.into(),
            short_id: short_id.into(),
            ..Self::default()
        }
    }
}

/// An economic release: actual, revision or estimate
///
/// The prior-* fields are populated only when the feed supplied revision
/// metadata; otherwise they stay zero or empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EconomicEvent {
    pub base: HeadlineBase,
    pub value: Measurement,
    pub prior_value: Measurement,
    pub prior_event_id: u64,
    pub prior_observation_period: String,
    pub prior_release: TimeInterval,
}

impl EconomicEvent {
    /// All-defaults event carrying only the two required identifiers
    pub fn new(global_id: impl Into<String>, short_id: impl Into<String>) -> Self {
        Self {
            base: HeadlineBase::new(global_id, short_id),
            ..Self::default()
        }
    }
}

/// A scheduled or published calendar entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarEvent {
    pub base: HeadlineBase,
    pub release_status: ReleaseStatus,
}

impl CalendarEvent {
    /// All-defaults entry carrying only the two required identifiers
    pub fn new(global_id: impl Into<String>, short_id: impl Into<String>) -> Self {
        Self {
            base: HeadlineBase::new(global_id, short_id),
            ..Self::default()
        }
    }
}
