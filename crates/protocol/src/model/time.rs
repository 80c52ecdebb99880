//! Timestamps and release intervals
//!
//! A [`Timestamp`] carries the wall-clock reading of an instant as
//! microseconds since the Unix epoch, plus the UTC offset (in minutes) that
//! reading was taken in. The offset is carried, never applied: two
//! timestamps compare by their wall-clock micros only within one offset.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Microseconds since epoch plus a minute offset from UTC
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    /// Wall-clock microseconds since 1970-01-01T00:00:00
    pub micros: u64,
    /// Offset from UTC in minutes
    pub offset: i16,
}

impl Timestamp {
    /// The zero timestamp used for absent times
    pub const EPOCH: Self = Self {
        micros: 0,
        offset: 0,
    };

    /// Create a timestamp from raw parts
    #[inline]
    pub const fn new(micros: u64, offset: i16) -> Self {
        Self { micros, offset }
    }

    /// Current time in UTC
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Convert a UTC instant
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self::from_wall_clock(instant.naive_utc(), 0)
    }

    /// Build from a wall-clock reading and its minute offset
    ///
    /// Readings before the epoch clamp to zero.
    pub fn from_wall_clock(wall: NaiveDateTime, offset: i16) -> Self {
        let micros = wall.and_utc().timestamp_micros();
        Self {
            micros: u64::try_from(micros).unwrap_or(0),
            offset,
        }
    }

    /// Midnight of the given date
    pub fn from_date(date: NaiveDate, offset: i16) -> Self {
        Self::from_wall_clock(date.and_time(chrono::NaiveTime::MIN), offset)
    }

    /// Check if this is the zero timestamp
    #[inline]
    pub const fn is_epoch(&self) -> bool {
        self.micros == 0 && self.offset == 0
    }

    /// The wall-clock reading this timestamp carries
    pub fn wall_clock(&self) -> Option<NaiveDateTime> {
        let micros = i64::try_from(self.micros).ok()?;
        DateTime::from_timestamp_micros(micros).map(|dt| dt.naive_utc())
    }

    /// The reading with its offset attached, if the offset is representable
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let zone = FixedOffset::east_opt(i32::from(self.offset) * 60)?;
        zone.from_local_datetime(&self.wall_clock()?).single()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.6f%:z")),
            None => write!(f, "{}us{:+}m", self.micros, self.offset),
        }
    }
}

/// Release-time interval; `start == end` for a single point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeInterval {
    /// Create an interval from its two ends
    #[inline]
    pub const fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Interval collapsed onto one instant
    #[inline]
    pub const fn point(at: Timestamp) -> Self {
        Self { start: at, end: at }
    }

    /// Check if both ends are the same instant
    #[inline]
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }
}
