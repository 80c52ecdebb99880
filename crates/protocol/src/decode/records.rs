//! Record decoders
//!
//! Absent slots take the same defaults the model uses: NaN for floats,
//! empty strings, zero integers and the epoch for times.

use super::table::FlatTable;
use crate::flatbuf::FlatMessage;
use crate::model::{
    CalendarEvent, EconomicEvent, EventKind, EventSubkind, HeadlineBase, LogRecord,
    MacroCalendarEvent, MacroHeadlineEvent, Measurement, Message, Module, ReferenceData,
    ReleaseStatus, TimeInterval, Timestamp,
};
use crate::schema::slots;
use crate::{MessageType, Result, verify};

/// Verify a buffer, then decode the record it carries
pub fn decode_message(buf: &[u8]) -> Result<Message> {
    let message_type = verify(buf)?;
    let msg = FlatMessage::parse(buf)?;
    let table = msg.message()?;

    let message = match message_type {
        MessageType::EconomicEvent => Message::Economic(economic_event(&table)?),
        MessageType::CalendarEvent => Message::Calendar(calendar_event(&table)?),
        MessageType::Log => Message::Log(log_record(&table)?),
        MessageType::ReferenceData => Message::Reference(reference_data(&table)?),
        MessageType::MacroHeadlineEvent => Message::MacroHeadline(macro_headline(&table)?),
        MessageType::MacroCalendarEvent => Message::MacroCalendar(macro_calendar(&table)?),
    };

    Ok(message)
}

fn string(table: &FlatTable<'_>, slot: usize) -> Result<String> {
    Ok(table.read_string(slot)?.unwrap_or_default().to_owned())
}

fn timestamp(table: &FlatTable<'_>, slot: usize) -> Result<Timestamp> {
    use slots::datetime::*;

    Ok(table
        .read_table(slot)?
        .map(|dt| Timestamp::new(dt.read_u64(MICROS, 0), dt.read_i16(OFFSET, 0)))
        .unwrap_or_default())
}

fn interval(table: &FlatTable<'_>, start: usize, end: usize) -> Result<TimeInterval> {
    Ok(TimeInterval::new(
        timestamp(table, start)?,
        timestamp(table, end)?,
    ))
}

fn measurement(table: &FlatTable<'_>, slot: usize) -> Result<Measurement> {
    use slots::value::*;

    let Some(v) = table.read_table(slot)? else {
        return Ok(Measurement::ABSENT);
    };

    Ok(Measurement {
        count: v.read_u32(COUNT, 0),
        value: v.read_f64(VALUE, f64::NAN),
        low: v.read_f64(LOW, f64::NAN),
        high: v.read_f64(HIGH, f64::NAN),
        median: v.read_f64(MEDIAN, f64::NAN),
        average: v.read_f64(AVERAGE, f64::NAN),
        standard_deviation: v.read_f64(STANDARD_DEVIATION, f64::NAN),
    })
}

fn headline(table: &FlatTable<'_>) -> Result<HeadlineBase> {
    use slots::headline::*;

    Ok(HeadlineBase {
        global_id: string(table, GLOBAL_ID)?,
        short_id: string(table, SHORT_ID)?,
        description: string(table, DESCRIPTION)?,
        kind: EventKind::from_u8(table.read_u8(KIND, 0)),
        subkind: EventSubkind::from_u8(table.read_u8(SUBKIND, 0)),
        event_id: table.read_u64(EVENT_ID, 0),
        observation_period: string(table, OBSERVATION_PERIOD)?,
        release: interval(table, RELEASE_START, RELEASE_END)?,
    })
}

fn economic_event(table: &FlatTable<'_>) -> Result<EconomicEvent> {
    use slots::economic::*;

    Ok(EconomicEvent {
        base: headline(table)?,
        value: measurement(table, VALUE)?,
        prior_value: measurement(table, PRIOR_VALUE)?,
        prior_event_id: table.read_u64(PRIOR_EVENT_ID, 0),
        prior_observation_period: string(table, PRIOR_OBSERVATION_PERIOD)?,
        prior_release: interval(table, PRIOR_RELEASE_START, PRIOR_RELEASE_END)?,
    })
}

fn calendar_event(table: &FlatTable<'_>) -> Result<CalendarEvent> {
    Ok(CalendarEvent {
        base: headline(table)?,
        release_status: ReleaseStatus::from_u8(table.read_u8(slots::calendar::RELEASE_STATUS, 0)),
    })
}

fn log_record(table: &FlatTable<'_>) -> Result<LogRecord> {
    use slots::log::*;

    Ok(LogRecord {
        timestamp: timestamp(table, TIMESTAMP)?,
        module: Module::from_u8(table.read_u8(MODULE, 0)),
        status: table.read_u8(STATUS, 0),
        correlation_id: table.read_u64(CORRELATION_ID, 0),
        message: string(table, MESSAGE)?,
    })
}

fn reference_data(table: &FlatTable<'_>) -> Result<ReferenceData> {
    use slots::reference::*;

    Ok(ReferenceData {
        correlation_id: table.read_u64(CORRELATION_ID, 0),
        global_id: string(table, GLOBAL_ID)?,
        short_id: string(table, SHORT_ID)?,
        description: string(table, DESCRIPTION)?,
        frequency: string(table, FREQUENCY)?,
        units: string(table, UNITS)?,
        country_iso: string(table, COUNTRY_ISO)?,
        source: string(table, SOURCE)?,
        seasonality: string(table, SEASONALITY)?,
    })
}

fn macro_headline(table: &FlatTable<'_>) -> Result<MacroHeadlineEvent> {
    use slots::macro_headline::*;

    Ok(MacroHeadlineEvent {
        correlation_id: table.read_u64(CORRELATION_ID, 0),
        kind: EventKind::from_u8(table.read_u8(KIND, 0)),
        subkind: EventSubkind::from_u8(table.read_u8(SUBKIND, 0)),
        event_id: table.read_u64(EVENT_ID, 0),
        observation_period: string(table, OBSERVATION_PERIOD)?,
        release: interval(table, RELEASE_START, RELEASE_END)?,
        prior_event_id: table.read_u64(PRIOR_EVENT_ID, 0),
        prior_observation_period: string(table, PRIOR_OBSERVATION_PERIOD)?,
        prior_release: interval(table, PRIOR_RELEASE_START, PRIOR_RELEASE_END)?,
        value: measurement(table, VALUE)?,
    })
}

fn macro_calendar(table: &FlatTable<'_>) -> Result<MacroCalendarEvent> {
    use slots::macro_calendar::*;

    Ok(MacroCalendarEvent {
        correlation_id: table.read_u64(CORRELATION_ID, 0),
        global_id: string(table, GLOBAL_ID)?,
        short_id: string(table, SHORT_ID)?,
        kind: EventKind::from_u8(table.read_u8(KIND, 0)),
        subkind: EventSubkind::from_u8(table.read_u8(SUBKIND, 0)),
        description: string(table, DESCRIPTION)?,
        event_id: table.read_u64(EVENT_ID, 0),
        observation_period: string(table, OBSERVATION_PERIOD)?,
        release: interval(table, RELEASE_START, RELEASE_END)?,
        release_status: ReleaseStatus::from_u8(table.read_u8(RELEASE_STATUS, 0)),
        relevance: table.read_f64(RELEVANCE, f64::NAN),
    })
}
