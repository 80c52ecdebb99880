//! Field resolution rules shared by the record parsers and the direct
//! encode path
//!
//! Optional fields follow one rule: present ? convert : default. Conversion
//! never fails past this module: text that does not parse becomes NaN or 0,
//! and an unrecognized choice variant becomes the all-default shape with an
//! [`Anomaly`] noted for best-effort reporting.

use std::fmt;

use econfeed_protocol::{
    EventKind, EventSubkind, Measurement, ReleaseStatus, TimeInterval, Timestamp,
};
use tracing::warn;

use crate::element::Element;
use crate::error::ParseError;
use crate::{Result, names};

/// A sub-field that could not be interpreted and was defaulted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    /// Field whose value was defaulted
    pub field: &'static str,
    /// What was found instead of a known shape
    pub found: String,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized variant '{}' in {}, using defaults",
            self.found, self.field
        )
    }
}

/// Anomalies gathered while parsing one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseNotes {
    anomalies: Vec<Anomaly>,
}

impl ParseNotes {
    pub fn new() -> Self {
        Self::default()
    }

    fn note(&mut self, field: &'static str, found: impl Into<String>) {
        let anomaly = Anomaly {
            field,
            found: found.into(),
        };
        warn!(field, found = %anomaly.found, "defaulting unrecognized variant");
        self.anomalies.push(anomaly);
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    pub fn is_empty(&self) -> bool {
        self.anomalies.is_empty()
    }
}

// =============================================================================
// Scalars
// =============================================================================

/// Required text identifier
pub(crate) fn required_text<E: Element>(
    e: &E,
    name: &'static str,
    record: &'static str,
) -> Result<String> {
    e.field(name)
        .map(|f| f.value_as_string().unwrap_or_default())
        .ok_or_else(|| ParseError::missing_field(record, name))
}

/// Optional text, empty when absent
pub(crate) fn text<E: Element>(e: &E, name: &str) -> String {
    e.field(name)
        .and_then(|f| f.value_as_string())
        .unwrap_or_default()
}

/// Optional integer id, 0 when absent or negative
pub(crate) fn id<E: Element>(e: &E, name: &str) -> u64 {
    e.field(name)
        .and_then(|f| f.value_as_i64())
        .and_then(|v| u64::try_from(v).ok())
        .unwrap_or(0)
}

/// Text value parsed as a float, NaN on failure
///
/// Leading whitespace is skipped and the longest numeric prefix is read, so
/// `"1.5%"` is 1.5. Overflow is a failure.
pub(crate) fn float_from_text<E: Element>(e: &E) -> f64 {
    e.value_as_string()
        .and_then(|s| float_prefix(&s))
        .unwrap_or(f64::NAN)
}

/// Text value parsed as an integer, 0 on failure
///
/// Reads an optional sign and the leading digits, so `"12.0"` is 12.
/// Values outside the 32-bit range are a failure.
pub(crate) fn int_from_text<E: Element>(e: &E) -> i64 {
    e.value_as_string()
        .and_then(|s| int_prefix(&s))
        .map(i64::from)
        .unwrap_or(0)
}

fn sign_len(bytes: &[u8]) -> usize {
    usize::from(matches!(bytes.first(), Some(b'+' | b'-')))
}

fn digits_from(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
}

pub(crate) fn int_prefix(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let sign = sign_len(bytes);
    let digits = digits_from(bytes, sign);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

pub(crate) fn float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let sign = sign_len(bytes);

    for word in ["infinity", "inf", "nan"] {
        if let Some(head) = s.get(sign..sign + word.len())
            && head.eq_ignore_ascii_case(word)
        {
            return s[..sign + word.len()].parse().ok();
        }
    }

    let whole = digits_from(bytes, sign);
    let mut end = sign + whole;
    if bytes.get(end) == Some(&b'.') {
        let fraction = digits_from(bytes, end + 1);
        if whole + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole == 0 && end == sign {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_sign = sign_len(&bytes[end + 1..]);
        let exp_digits = digits_from(bytes, end + 1 + exp_sign);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Optional float carried as text, NaN when absent
pub(crate) fn float<E: Element>(e: &E, name: &str) -> f64 {
    e.field(name)
        .map(|f| float_from_text(&f))
        .unwrap_or(f64::NAN)
}

pub(crate) fn kind<E: Element>(e: &E) -> EventKind {
    e.field(names::EVENT_TYPE)
        .and_then(|f| f.value_as_string())
        .map(|s| EventKind::parse(&s))
        .unwrap_or_default()
}

pub(crate) fn subkind<E: Element>(e: &E) -> EventSubkind {
    e.field(names::EVENT_SUBTYPE)
        .and_then(|f| f.value_as_string())
        .map(|s| EventSubkind::parse(&s))
        .unwrap_or_default()
}

pub(crate) fn release_status<E: Element>(e: &E) -> ReleaseStatus {
    e.field(names::RELEASE_STATUS)
        .and_then(|f| f.value_as_string())
        .map(|s| ReleaseStatus::parse(&s))
        .unwrap_or_default()
}

// =============================================================================
// Choices
// =============================================================================

fn instant<E: Element>(e: &E) -> Timestamp {
    e.value_as_datetime()
        .map(|dt| dt.timestamp())
        .unwrap_or_default()
}

/// Release interval from a DATETIME / DATE / DATARANGE choice
///
/// A point sets both ends; a range missing either end defaults both.
pub(crate) fn interval<E: Element>(
    e: &E,
    name: &'static str,
    notes: &mut ParseNotes,
) -> TimeInterval {
    let Some(field) = e.field(name) else {
        return TimeInterval::default();
    };
    let Some(choice) = field.choice() else {
        notes.note(name, "<not a choice>");
        return TimeInterval::default();
    };

    match choice.name() {
        names::DATETIME | names::DATE => {
            if choice.is_null() {
                return TimeInterval::default();
            }
            TimeInterval::point(instant(&choice))
        }
        names::DATARANGE => match (choice.field(names::START), choice.field(names::END)) {
            (Some(start), Some(end)) => TimeInterval::new(instant(&start), instant(&end)),
            _ => TimeInterval::default(),
        },
        other => {
            notes.note(name, other);
            TimeInterval::default()
        }
    }
}

/// Measurement from a SINGLE / DISTRIBUTION choice
pub(crate) fn measurement<E: Element>(
    e: &E,
    name: &'static str,
    notes: &mut ParseNotes,
) -> Measurement {
    let Some(field) = e.field(name) else {
        return Measurement::ABSENT;
    };
    let Some(choice) = field.choice() else {
        notes.note(name, "<not a choice>");
        return Measurement::ABSENT;
    };

    match choice.name() {
        names::SINGLE => Measurement::single(float_from_text(&choice)),
        names::DISTRIBUTION => {
            let count = choice
                .field(names::NUMBER)
                .map(|n| int_from_text(&n))
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            Measurement::distribution(
                count,
                float(&choice, names::LOW),
                float(&choice, names::HIGH),
                float(&choice, names::MEDIAN),
                float(&choice, names::AVERAGE),
                float(&choice, names::STANDARD_DEVIATION),
            )
        }
        other => {
            notes.note(name, other);
            Measurement::ABSENT
        }
    }
}

// =============================================================================
// Revision metadata
// =============================================================================

/// Prior-period fields from a revision group
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Revision {
    pub event_id: u64,
    pub observation_period: String,
    pub release: TimeInterval,
}

/// Read prior-period fields from `group`
pub(crate) fn revision<E: Element>(group: &E, notes: &mut ParseNotes) -> Revision {
    Revision {
        event_id: id(group, names::PRIOR_EVENT_ID),
        observation_period: text(group, names::PRIOR_OBSERVATION_PERIOD),
        release: interval(group, names::PRIOR_ECO_RELEASE_DT, notes),
    }
}

/// Prior-period fields nested under REVISION_METADATA, defaults when absent
pub(crate) fn revision_metadata<E: Element>(e: &E, notes: &mut ParseNotes) -> Revision {
    e.field(names::REVISION_METADATA)
        .map(|group| revision(&group, notes))
        .unwrap_or_default()
}
