//! Domain model
//!
//! Strongly-typed records produced by the element parser and consumed by the
//! codec. Records are plain values: built once, encoded once, never shared.

mod event;
mod log;
mod measurement;
mod series;
mod time;

pub use event::{CalendarEvent, EconomicEvent, EventKind, EventSubkind, HeadlineBase, ReleaseStatus};
pub use log::{
    LogRecord, Module, ServiceStatus, SessionStatus, SubscriptionStatus, SystemStatus, status_name,
};
pub use measurement::Measurement;
pub use series::{MacroCalendarEvent, MacroHeadlineEvent, ReferenceData};
pub use time::{TimeInterval, Timestamp};

use crate::MessageType;

/// Any record the wire envelope can carry
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Economic(EconomicEvent),
    Calendar(CalendarEvent),
    Log(LogRecord),
    Reference(ReferenceData),
    MacroHeadline(MacroHeadlineEvent),
    MacroCalendar(MacroCalendarEvent),
}

impl Message {
    /// Envelope discriminant for this record
    pub const fn message_type(&self) -> MessageType {
        match self {
            Self::Economic(_) => MessageType::EconomicEvent,
            Self::Calendar(_) => MessageType::CalendarEvent,
            Self::Log(_) => MessageType::Log,
            Self::Reference(_) => MessageType::ReferenceData,
            Self::MacroHeadline(_) => MessageType::MacroHeadlineEvent,
            Self::MacroCalendar(_) => MessageType::MacroCalendarEvent,
        }
    }
}

macro_rules! impl_from_record {
    ($($record:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$record> for Message {
                fn from(record: $record) -> Self {
                    Self::$variant(record)
                }
            }
        )+
    };
}

impl_from_record!(
    EconomicEvent => Economic,
    CalendarEvent => Calendar,
    LogRecord => Log,
    ReferenceData => Reference,
    MacroHeadlineEvent => MacroHeadline,
    MacroCalendarEvent => MacroCalendar,
);
