//! Element capability
//!
//! The parser reads inbound events through [`Element`] only. An adapter over
//! the real feed's tree type implements it; tests use [`crate::ElementNode`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use econfeed_protocol::Timestamp;

/// Read access to one node of a dynamically-typed, named element tree
///
/// Implementors are cheap handles (references or reference-counted views):
/// lookups return new handles by value.
pub trait Element: Sized {
    /// Name of this node
    fn name(&self) -> &str;

    /// Check if a named child is present
    fn has_field(&self, name: &str) -> bool;

    /// Named child, if present
    fn field(&self, name: &str) -> Option<Self>;

    /// Check if this node selects one of several named shapes
    fn is_choice(&self) -> bool;

    /// The selected variant of a choice node
    fn choice(&self) -> Option<Self>;

    /// Check if this node holds an explicit null
    fn is_null(&self) -> bool;

    /// Scalar value rendered as text
    fn value_as_string(&self) -> Option<String>;

    /// Scalar value as an integer
    fn value_as_i64(&self) -> Option<i64>;

    /// Scalar value as a feed datetime
    fn value_as_datetime(&self) -> Option<Datetime>;
}

/// A feed datetime: any of its date and time parts may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Datetime {
    pub date: Option<NaiveDate>,
    /// Time of day, fractional seconds included
    pub time: Option<NaiveTime>,
    /// Offset from UTC in minutes
    pub offset: i16,
}

impl Datetime {
    /// Date and time of day
    pub fn new(wall: NaiveDateTime, offset: i16) -> Self {
        Self {
            date: Some(wall.date()),
            time: Some(wall.time()),
            offset,
        }
    }

    /// Date only
    pub fn date(date: NaiveDate, offset: i16) -> Self {
        Self {
            date: Some(date),
            time: None,
            offset,
        }
    }

    /// Wall-clock microseconds with the offset carried alongside
    ///
    /// A missing date reads as 1970-01-01 and a missing time as midnight.
    pub fn timestamp(&self) -> Timestamp {
        let date = self.date.unwrap_or_default();
        let time = self.time.unwrap_or(NaiveTime::MIN);
        Timestamp::from_wall_clock(date.and_time(time), self.offset)
    }
}
