//! Record kind resolution
//!
//! The record kind comes from the element's own name, or from the selected
//! variant when the root is a choice.

use std::fmt;

use econfeed_protocol::{Message, MessageType};

use crate::element::Element;
use crate::error::ParseError;
use crate::fields::ParseNotes;
use crate::{Result, direct, names, records};

/// Record kinds delivered by the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    EconomicEvent,
    CalendarEvent,
    ReferenceData,
    MacroHeadlineEvent,
    MacroCalendarEvent,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::EconomicEvent,
        RecordKind::CalendarEvent,
        RecordKind::ReferenceData,
        RecordKind::MacroHeadlineEvent,
        RecordKind::MacroCalendarEvent,
    ];

    /// Look up a kind by feed element name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Feed element name
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::EconomicEvent => names::HEADLINE_ECONOMIC_EVENT,
            RecordKind::CalendarEvent => names::HEADLINE_CALENDAR_EVENT,
            RecordKind::ReferenceData => names::MACRO_REFERENCE_DATA,
            RecordKind::MacroHeadlineEvent => names::MACRO_HEADLINE_EVENT,
            RecordKind::MacroCalendarEvent => names::MACRO_CALENDAR_EVENT,
        }
    }

    /// Envelope discriminant the record is encoded under
    pub fn message_type(&self) -> MessageType {
        match self {
            RecordKind::EconomicEvent => MessageType::EconomicEvent,
            RecordKind::CalendarEvent => MessageType::CalendarEvent,
            RecordKind::ReferenceData => MessageType::ReferenceData,
            RecordKind::MacroHeadlineEvent => MessageType::MacroHeadlineEvent,
            RecordKind::MacroCalendarEvent => MessageType::MacroCalendarEvent,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the record kind and the node holding its fields
pub fn resolve<E: Element>(e: E) -> Result<(RecordKind, E)> {
    if let Some(kind) = RecordKind::from_name(e.name()) {
        // A named record may still wrap its body in a choice
        return Ok(match e.choice() {
            Some(selected) if RecordKind::from_name(selected.name()) == Some(kind) => {
                (kind, selected)
            }
            _ => (kind, e),
        });
    }

    if let Some(selected) = e.choice()
        && let Some(kind) = RecordKind::from_name(selected.name())
    {
        return Ok((kind, selected));
    }

    Err(ParseError::unknown_record(e.name()))
}

pub(crate) fn parse_with_notes<E: Element>(
    e: E,
    correlation_id: u64,
    notes: &mut ParseNotes,
) -> Result<Message> {
    let (kind, node) = resolve(e)?;
    let message = match kind {
        RecordKind::EconomicEvent => records::economic_event(&node, notes)?.into(),
        RecordKind::CalendarEvent => records::calendar_event(&node, notes)?.into(),
        RecordKind::ReferenceData => records::reference_data(&node, correlation_id)?.into(),
        RecordKind::MacroHeadlineEvent => {
            records::macro_headline_event(&node, correlation_id, notes).into()
        }
        RecordKind::MacroCalendarEvent => {
            records::macro_calendar_event(&node, correlation_id, notes)?.into()
        }
    };
    Ok(message)
}

pub(crate) fn encode_with_notes<E: Element>(
    e: E,
    correlation_id: u64,
    notes: &mut ParseNotes,
) -> Result<Vec<u8>> {
    let (kind, node) = resolve(e)?;
    match kind {
        RecordKind::EconomicEvent => direct::economic_event(&node, notes),
        RecordKind::CalendarEvent => direct::calendar_event(&node, notes),
        RecordKind::ReferenceData => direct::reference_data(&node, correlation_id),
        RecordKind::MacroHeadlineEvent => Ok(direct::macro_headline_event(
            &node,
            correlation_id,
            notes,
        )),
        RecordKind::MacroCalendarEvent => {
            direct::macro_calendar_event(&node, correlation_id, notes)
        }
    }
}

/// Parse any supported record element
///
/// `correlation_id` is carried by the series records and ignored by the
/// headline events.
pub fn parse_message<E: Element>(e: E, correlation_id: u64) -> Result<Message> {
    parse_with_notes(e, correlation_id, &mut ParseNotes::new())
}

/// Encode any supported record element straight to a wire buffer
pub fn encode_element<E: Element>(e: E, correlation_id: u64) -> Result<Vec<u8>> {
    encode_with_notes(e, correlation_id, &mut ParseNotes::new())
}
