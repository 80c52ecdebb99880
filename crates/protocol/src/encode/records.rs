//! Record encoders
//!
//! Each record maps onto its schema table slot for slot. All fields are
//! always written, so absent values (NaN, zero, empty) round-trip exactly.

use super::table::{TableBuilder, finish_message};
use crate::model::{
    CalendarEvent, EconomicEvent, HeadlineBase, LogRecord, MacroCalendarEvent, MacroHeadlineEvent,
    Measurement, Message, ReferenceData, Timestamp,
};
use crate::schema::{
    CALENDAR_EVENT_LAYOUT, ECONOMIC_EVENT_LAYOUT, LOG_LAYOUT, MACRO_CALENDAR_LAYOUT,
    MACRO_HEADLINE_LAYOUT, MessageType, REFERENCE_DATA_LAYOUT, VALUE_LAYOUT, slots,
};
use crate::{MAX_MESSAGE_SIZE, ProtocolError, Result};

/// A record that can be written as a self-contained wire buffer
pub trait Encode {
    /// Envelope discriminant written ahead of the record
    const MESSAGE_TYPE: MessageType;

    /// Describe the record as a table
    fn to_table(&self) -> TableBuilder<'_>;

    /// Produce a fresh, self-contained buffer
    ///
    /// No size limit is applied here. Buffers longer than
    /// [`MAX_MESSAGE_SIZE`] fail `verify`, so a record carrying very long
    /// strings should go through [`Encode::try_encode`] instead.
    fn encode(&self) -> Vec<u8> {
        finish_message(Self::MESSAGE_TYPE, self.to_table())
    }

    /// Like [`Encode::encode`], refusing buffers that `verify` would reject
    fn try_encode(&self) -> Result<Vec<u8>> {
        let buf = self.encode();
        if buf.len() > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::message_too_large(buf.len(), MAX_MESSAGE_SIZE));
        }
        Ok(buf)
    }
}

/// DateTime sub-table
pub fn timestamp_table(ts: &Timestamp) -> TableBuilder<'static> {
    TableBuilder::with_slots(2)
        .u64(slots::datetime::MICROS, ts.micros)
        .i16(slots::datetime::OFFSET, ts.offset)
}

/// Value sub-table
pub fn measurement_table(m: &Measurement) -> TableBuilder<'static> {
    use slots::value::*;

    TableBuilder::with_slots(VALUE_LAYOUT.len())
        .u32(COUNT, m.count)
        .f64(VALUE, m.value)
        .f64(LOW, m.low)
        .f64(HIGH, m.high)
        .f64(MEDIAN, m.median)
        .f64(AVERAGE, m.average)
        .f64(STANDARD_DEVIATION, m.standard_deviation)
}

/// Write the headline base into slots 0..=8 of an economic or calendar table
fn headline_table<'a>(base: &'a HeadlineBase, slot_count: usize) -> TableBuilder<'a> {
    use slots::headline::*;

    TableBuilder::with_slots(slot_count)
        .str(GLOBAL_ID, base.global_id.as_str())
        .str(SHORT_ID, base.short_id.as_str())
        .str(DESCRIPTION, base.description.as_str())
        .u8(KIND, base.kind.as_u8())
        .u8(SUBKIND, base.subkind.as_u8())
        .u64(EVENT_ID, base.event_id)
        .str(OBSERVATION_PERIOD, base.observation_period.as_str())
        .table(RELEASE_START, timestamp_table(&base.release.start))
        .table(RELEASE_END, timestamp_table(&base.release.end))
}

impl Encode for EconomicEvent {
    const MESSAGE_TYPE: MessageType = MessageType::EconomicEvent;

    fn to_table(&self) -> TableBuilder<'_> {
        use slots::economic::*;

        headline_table(&self.base, ECONOMIC_EVENT_LAYOUT.len())
            .table(VALUE, measurement_table(&self.value))
            .table(PRIOR_VALUE, measurement_table(&self.prior_value))
            .u64(PRIOR_EVENT_ID, self.prior_event_id)
            .str(PRIOR_OBSERVATION_PERIOD, self.prior_observation_period.as_str())
            .table(PRIOR_RELEASE_START, timestamp_table(&self.prior_release.start))
            .table(PRIOR_RELEASE_END, timestamp_table(&self.prior_release.end))
    }
}

impl Encode for CalendarEvent {
    const MESSAGE_TYPE: MessageType = MessageType::CalendarEvent;

    fn to_table(&self) -> TableBuilder<'_> {
        headline_table(&self.base, CALENDAR_EVENT_LAYOUT.len())
            .u8(slots::calendar::RELEASE_STATUS, self.release_status.as_u8())
    }
}

impl Encode for LogRecord {
    const MESSAGE_TYPE: MessageType = MessageType::Log;

    fn to_table(&self) -> TableBuilder<'_> {
        use slots::log::*;

        TableBuilder::with_slots(LOG_LAYOUT.len())
            .table(TIMESTAMP, timestamp_table(&self.timestamp))
            .u8(MODULE, self.module.as_u8())
            .u8(STATUS, self.status)
            .u64(CORRELATION_ID, self.correlation_id)
            .str(MESSAGE, self.message.as_str())
    }
}

impl Encode for ReferenceData {
    const MESSAGE_TYPE: MessageType = MessageType::ReferenceData;

    fn to_table(&self) -> TableBuilder<'_> {
        use slots::reference::*;

        TableBuilder::with_slots(REFERENCE_DATA_LAYOUT.len())
            .u64(CORRELATION_ID, self.correlation_id)
            .str(GLOBAL_ID, self.global_id.as_str())
            .str(SHORT_ID, self.short_id.as_str())
            .str(DESCRIPTION, self.description.as_str())
            .str(FREQUENCY, self.frequency.as_str())
            .str(UNITS, self.units.as_str())
            .str(COUNTRY_ISO, self.country_iso.as_str())
            .str(SOURCE, self.source.as_str())
            .str(SEASONALITY, self.seasonality.as_str())
    }
}

impl Encode for MacroHeadlineEvent {
    const MESSAGE_TYPE: MessageType = MessageType::MacroHeadlineEvent;

    fn to_table(&self) -> TableBuilder<'_> {
        use slots::macro_headline::*;

        TableBuilder::with_slots(MACRO_HEADLINE_LAYOUT.len())
            .u64(CORRELATION_ID, self.correlation_id)
            .u8(KIND, self.kind.as_u8())
            .u8(SUBKIND, self.subkind.as_u8())
            .u64(EVENT_ID, self.event_id)
            .str(OBSERVATION_PERIOD, self.observation_period.as_str())
            .table(RELEASE_START, timestamp_table(&self.release.start))
            .table(RELEASE_END, timestamp_table(&self.release.end))
            .u64(PRIOR_EVENT_ID, self.prior_event_id)
            .str(PRIOR_OBSERVATION_PERIOD, self.prior_observation_period.as_str())
            .table(PRIOR_RELEASE_START, timestamp_table(&self.prior_release.start))
            .table(PRIOR_RELEASE_END, timestamp_table(&self.prior_release.end))
            .table(VALUE, measurement_table(&self.value))
    }
}

impl Encode for MacroCalendarEvent {
    const MESSAGE_TYPE: MessageType = MessageType::MacroCalendarEvent;

    fn to_table(&self) -> TableBuilder<'_> {
        use slots::macro_calendar::*;

        TableBuilder::with_slots(MACRO_CALENDAR_LAYOUT.len())
            .u64(CORRELATION_ID, self.correlation_id)
            .str(GLOBAL_ID, self.global_id.as_str())
            .str(SHORT_ID, self.short_id.as_str())
            .u8(KIND, self.kind.as_u8())
            .u8(SUBKIND, self.subkind.as_u8())
            .str(DESCRIPTION, self.description.as_str())
            .u64(EVENT_ID, self.event_id)
            .str(OBSERVATION_PERIOD, self.observation_period.as_str())
            .table(RELEASE_START, timestamp_table(&self.release.start))
            .table(RELEASE_END, timestamp_table(&self.release.end))
            .u8(RELEASE_STATUS, self.release_status.as_u8())
            .f64(RELEVANCE, self.relevance)
    }
}

/// Encode any record into a fresh buffer
pub fn encode_message(message: &Message) -> Vec<u8> {
    match message {
        Message::Economic(m) => m.encode(),
        Message::Calendar(m) => m.encode(),
        Message::Log(m) => m.encode(),
        Message::Reference(m) => m.encode(),
        Message::MacroHeadline(m) => m.encode(),
        Message::MacroCalendar(m) => m.encode(),
    }
}

impl Message {
    /// Encode into a fresh buffer
    pub fn encode(&self) -> Vec<u8> {
        encode_message(self)
    }
}
