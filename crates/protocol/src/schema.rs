//! Wire schema for econfeed messages
//!
//! Every buffer is a FlatBuffers-compatible `Main` table:
//!
//! ```text
//! table Main {
//!     message_type:ubyte (id: 0);   // MessageType discriminant
//!     message:<record table> (id: 1);
//!     version:ubyte (id: 2);        // SCHEMA_VERSION at write time
//! }
//! table DateTime { micros:ulong (id: 0); offset:short (id: 1); }
//! table Value {
//!     count:uint (id: 0); value:double (id: 1); low:double (id: 2);
//!     high:double (id: 3); median:double (id: 4); average:double (id: 5);
//!     standard_deviation:double (id: 6);
//! }
//! ```
//!
//! Record tables are described by the slot constants in [`slots`] and the
//! matching [`FieldKind`] layouts, which the verifier walks. New fields may
//! only be appended to the end of a layout.

/// Record kind carried by a `Main` envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    EconomicEvent = 1,
    CalendarEvent = 2,
    Log = 3,
    ReferenceData = 4,
    MacroHeadlineEvent = 5,
    MacroCalendarEvent = 6,
}

impl MessageType {
    /// Parse discriminant; `None` for 0 and values this build does not know
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::EconomicEvent),
            2 => Some(Self::CalendarEvent),
            3 => Some(Self::Log),
            4 => Some(Self::ReferenceData),
            5 => Some(Self::MacroHeadlineEvent),
            6 => Some(Self::MacroCalendarEvent),
            _ => None,
        }
    }

    /// Convert to raw byte value
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get the string name of this message type
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EconomicEvent => "economic_event",
            Self::CalendarEvent => "calendar_event",
            Self::Log => "log",
            Self::ReferenceData => "reference_data",
            Self::MacroHeadlineEvent => "macro_headline_event",
            Self::MacroCalendarEvent => "macro_calendar_event",
        }
    }

    /// Field layout of the record table this type carries
    pub const fn layout(self) -> &'static [FieldKind] {
        match self {
            Self::EconomicEvent => ECONOMIC_EVENT_LAYOUT,
            Self::CalendarEvent => CALENDAR_EVENT_LAYOUT,
            Self::Log => LOG_LAYOUT,
            Self::ReferenceData => REFERENCE_DATA_LAYOUT,
            Self::MacroHeadlineEvent => MACRO_HEADLINE_LAYOUT,
            Self::MacroCalendarEvent => MACRO_CALENDAR_LAYOUT,
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Wire type of one table slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    I16,
    U32,
    U64,
    F64,
    /// Offset to a length-prefixed, NUL-terminated UTF-8 string
    Str,
    /// Offset to a sub-table with the given layout
    Table(&'static [FieldKind]),
}

impl FieldKind {
    /// Bytes the slot occupies inside its table
    #[inline]
    pub const fn inline_size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::I16 => 2,
            Self::U32 | Self::Str | Self::Table(_) => 4,
            Self::U64 | Self::F64 => 8,
        }
    }
}

/// Vtable slot indices, one module per table
pub mod slots {
    pub mod main {
        pub const MESSAGE_TYPE: usize = 0;
        pub const MESSAGE: usize = 1;
        pub const VERSION: usize = 2;
    }

    pub mod datetime {
        pub const MICROS: usize = 0;
        pub const OFFSET: usize = 1;
    }

    pub mod value {
        pub const COUNT: usize = 0;
        pub const VALUE: usize = 1;
        pub const LOW: usize = 2;
        pub const HIGH: usize = 3;
        pub const MEDIAN: usize = 4;
        pub const AVERAGE: usize = 5;
        pub const STANDARD_DEVIATION: usize = 6;
    }

    /// Slots shared by economic and calendar events (the headline base)
    pub mod headline {
        pub const GLOBAL_ID: usize = 0;
        pub const SHORT_ID: usize = 1;
        pub const DESCRIPTION: usize = 2;
        pub const KIND: usize = 3;
        pub const SUBKIND: usize = 4;
        pub const EVENT_ID: usize = 5;
        pub const OBSERVATION_PERIOD: usize = 6;
        pub const RELEASE_START: usize = 7;
        pub const RELEASE_END: usize = 8;
    }

    pub mod economic {
        pub use super::headline::*;
        pub const VALUE: usize = 9;
        pub const PRIOR_VALUE: usize = 10;
        pub const PRIOR_EVENT_ID: usize = 11;
        pub const PRIOR_OBSERVATION_PERIOD: usize = 12;
        pub const PRIOR_RELEASE_START: usize = 13;
        pub const PRIOR_RELEASE_END: usize = 14;
    }

    pub mod calendar {
        pub use super::headline::*;
        pub const RELEASE_STATUS: usize = 9;
    }

    pub mod log {
        pub const TIMESTAMP: usize = 0;
        pub const MODULE: usize = 1;
        pub const STATUS: usize = 2;
        pub const CORRELATION_ID: usize = 3;
        pub const MESSAGE: usize = 4;
    }

    pub mod reference {
        pub const CORRELATION_ID: usize = 0;
        pub const GLOBAL_ID: usize = 1;
        pub const SHORT_ID: usize = 2;
        pub const DESCRIPTION: usize = 3;
        pub const FREQUENCY: usize = 4;
        pub const UNITS: usize = 5;
        pub const COUNTRY_ISO: usize = 6;
        pub const SOURCE: usize = 7;
        pub const SEASONALITY: usize = 8;
    }

    pub mod macro_headline {
        pub const CORRELATION_ID: usize = 0;
        pub const KIND: usize = 1;
        pub const SUBKIND: usize = 2;
        pub const EVENT_ID: usize = 3;
        pub const OBSERVATION_PERIOD: usize = 4;
        pub const RELEASE_START: usize = 5;
        pub const RELEASE_END: usize = 6;
        pub const PRIOR_EVENT_ID: usize = 7;
        pub const PRIOR_OBSERVATION_PERIOD: usize = 8;
        pub const PRIOR_RELEASE_START: usize = 9;
        pub const PRIOR_RELEASE_END: usize = 10;
        pub const VALUE: usize = 11;
    }

    pub mod macro_calendar {
        pub const CORRELATION_ID: usize = 0;
        pub const GLOBAL_ID: usize = 1;
        pub const SHORT_ID: usize = 2;
        pub const KIND: usize = 3;
        pub const SUBKIND: usize = 4;
        pub const DESCRIPTION: usize = 5;
        pub const EVENT_ID: usize = 6;
        pub const OBSERVATION_PERIOD: usize = 7;
        pub const RELEASE_START: usize = 8;
        pub const RELEASE_END: usize = 9;
        pub const RELEASE_STATUS: usize = 10;
        pub const RELEVANCE: usize = 11;
    }
}

use FieldKind::{F64, I16, Str, Table, U8, U32, U64};

pub const DATETIME_LAYOUT: &[FieldKind] = &[U64, I16];

pub const VALUE_LAYOUT: &[FieldKind] = &[U32, F64, F64, F64, F64, F64, F64];

const DT: FieldKind = Table(DATETIME_LAYOUT);
const VALUE: FieldKind = Table(VALUE_LAYOUT);

pub const ECONOMIC_EVENT_LAYOUT: &[FieldKind] = &[
    Str, Str, Str, U8, U8, U64, Str, DT, DT, // headline
    VALUE, VALUE, U64, Str, DT, DT,
];

pub const CALENDAR_EVENT_LAYOUT: &[FieldKind] = &[
    Str, Str, Str, U8, U8, U64, Str, DT, DT, // headline
    U8,
];

pub const LOG_LAYOUT: &[FieldKind] = &[DT, U8, U8, U64, Str];

pub const REFERENCE_DATA_LAYOUT: &[FieldKind] = &[U64, Str, Str, Str, Str, Str, Str, Str, Str];

pub const MACRO_HEADLINE_LAYOUT: &[FieldKind] = &[U64, U8, U8, U64, Str, DT, DT, U64, Str, DT, DT, VALUE];

pub const MACRO_CALENDAR_LAYOUT: &[FieldKind] = &[U64, Str, Str, U8, U8, Str, U64, Str, DT, DT, U8, F64];
