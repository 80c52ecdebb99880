//! Element tree straight to wire buffer
//!
//! Applies the same field rules as [`crate::records`] while filling schema
//! tables directly, for producers that never need the typed record. Output
//! is byte-identical to encoding the parsed record.

use econfeed_protocol::schema::{
    CALENDAR_EVENT_LAYOUT, ECONOMIC_EVENT_LAYOUT, MACRO_CALENDAR_LAYOUT, MACRO_HEADLINE_LAYOUT,
    REFERENCE_DATA_LAYOUT, slots,
};
use econfeed_protocol::{
    MessageType, TableBuilder, TimeInterval, finish_message, measurement_table, timestamp_table,
};

use crate::Result;
use crate::element::Element;
use crate::fields::{
    ParseNotes, float, id, interval, kind, measurement, release_status, required_text,
    revision, revision_metadata, subkind, text,
};
use crate::names;

/// Set a start/end DateTime pair
fn with_interval(
    table: TableBuilder<'static>,
    start_slot: usize,
    end_slot: usize,
    interval: TimeInterval,
) -> TableBuilder<'static> {
    table
        .table(start_slot, timestamp_table(&interval.start))
        .table(end_slot, timestamp_table(&interval.end))
}

fn headline_table<E: Element>(
    e: &E,
    record: &'static str,
    slot_count: usize,
    notes: &mut ParseNotes,
) -> Result<TableBuilder<'static>> {
    use slots::headline::*;

    let table = TableBuilder::with_slots(slot_count)
        .str(GLOBAL_ID, required_text(e, names::ID_BB_GLOBAL, record)?)
        .str(SHORT_ID, required_text(e, names::PARSEKYABLE_DES, record)?)
        .str(DESCRIPTION, text(e, names::DESCRIPTION))
        .u8(KIND, kind(e).as_u8())
        .u8(SUBKIND, subkind(e).as_u8())
        .u64(EVENT_ID, id(e, names::EVENT_ID))
        .str(OBSERVATION_PERIOD, text(e, names::OBSERVATION_PERIOD));

    let release = interval(e, names::ECO_RELEASE_DT, notes);
    Ok(with_interval(table, RELEASE_START, RELEASE_END, release))
}

pub(crate) fn economic_event<E: Element>(e: &E, notes: &mut ParseNotes) -> Result<Vec<u8>> {
    use slots::economic::*;

    let table = headline_table(e, names::HEADLINE_ECONOMIC_EVENT, ECONOMIC_EVENT_LAYOUT.len(), notes)?;
    let prior = revision_metadata(e, notes);

    let table = table
        .table(VALUE, measurement_table(&measurement(e, names::VALUE, notes)))
        .table(PRIOR_VALUE, measurement_table(&measurement(e, names::PRIOR_VALUE, notes)))
        .u64(PRIOR_EVENT_ID, prior.event_id)
        .str(PRIOR_OBSERVATION_PERIOD, prior.observation_period);
    let table = with_interval(table, PRIOR_RELEASE_START, PRIOR_RELEASE_END, prior.release);

    Ok(finish_message(MessageType::EconomicEvent, table))
}

pub(crate) fn calendar_event<E: Element>(e: &E, notes: &mut ParseNotes) -> Result<Vec<u8>> {
    let table = headline_table(e, names::HEADLINE_CALENDAR_EVENT, CALENDAR_EVENT_LAYOUT.len(), notes)?
        .u8(slots::calendar::RELEASE_STATUS, release_status(e).as_u8());

    Ok(finish_message(MessageType::CalendarEvent, table))
}

pub(crate) fn reference_data<E: Element>(e: &E, correlation_id: u64) -> Result<Vec<u8>> {
    use slots::reference::*;
    const RECORD: &str = names::MACRO_REFERENCE_DATA;

    let table = TableBuilder::with_slots(REFERENCE_DATA_LAYOUT.len())
        .u64(CORRELATION_ID, correlation_id)
        .str(GLOBAL_ID, required_text(e, names::ID_BB_GLOBAL, RECORD)?)
        .str(SHORT_ID, required_text(e, names::PARSEKYABLE_DES, RECORD)?)
        .str(DESCRIPTION, text(e, names::DESCRIPTION))
        .str(FREQUENCY, text(e, names::INDX_FREQ))
        .str(UNITS, text(e, names::INDX_UNITS))
        .str(COUNTRY_ISO, text(e, names::COUNTRY_ISO))
        .str(SOURCE, text(e, names::INDX_SOURCE))
        .str(SEASONALITY, text(e, names::SEASONALITY_AND_TRANSFORMATION));

    Ok(finish_message(MessageType::ReferenceData, table))
}

pub(crate) fn macro_headline_event<E: Element>(
    e: &E,
    correlation_id: u64,
    notes: &mut ParseNotes,
) -> Vec<u8> {
    use slots::macro_headline::*;

    let prior = match e.field(names::REVISION_METADATA) {
        Some(group) => revision(&group, notes),
        None => revision(e, notes),
    };

    let table = TableBuilder::with_slots(MACRO_HEADLINE_LAYOUT.len())
        .u64(CORRELATION_ID, correlation_id)
        .u8(KIND, kind(e).as_u8())
        .u8(SUBKIND, subkind(e).as_u8())
        .u64(EVENT_ID, id(e, names::EVENT_ID))
        .str(OBSERVATION_PERIOD, text(e, names::OBSERVATION_PERIOD));
    let table = with_interval(table, RELEASE_START, RELEASE_END, interval(e, names::ECO_RELEASE_DT, notes))
        .u64(PRIOR_EVENT_ID, prior.event_id)
        .str(PRIOR_OBSERVATION_PERIOD, prior.observation_period);
    let table = with_interval(table, PRIOR_RELEASE_START, PRIOR_RELEASE_END, prior.release)
        .table(VALUE, measurement_table(&measurement(e, names::VALUE, notes)));

    finish_message(MessageType::MacroHeadlineEvent, table)
}

pub(crate) fn macro_calendar_event<E: Element>(
    e: &E,
    correlation_id: u64,
    notes: &mut ParseNotes,
) -> Result<Vec<u8>> {
    use slots::macro_calendar::*;
    const RECORD: &str = names::MACRO_CALENDAR_EVENT;

    let table = TableBuilder::with_slots(MACRO_CALENDAR_LAYOUT.len())
        .u64(CORRELATION_ID, correlation_id)
        .str(GLOBAL_ID, required_text(e, names::ID_BB_GLOBAL, RECORD)?)
        .str(SHORT_ID, required_text(e, names::PARSEKYABLE_DES, RECORD)?)
        .u8(KIND, kind(e).as_u8())
        .u8(SUBKIND, subkind(e).as_u8())
        .str(DESCRIPTION, text(e, names::DESCRIPTION))
        .u64(EVENT_ID, id(e, names::EVENT_ID))
        .str(OBSERVATION_PERIOD, text(e, names::OBSERVATION_PERIOD));
    let table = with_interval(table, RELEASE_START, RELEASE_END, interval(e, names::ECO_RELEASE_DT, notes))
        .u8(RELEASE_STATUS, release_status(e).as_u8())
        .f64(RELEVANCE, float(e, names::RELEVANCE_VALUE));

    Ok(finish_message(MessageType::MacroCalendarEvent, table))
}

// =============================================================================
// Public entry points
// =============================================================================

/// Encode an economic headline element without building the record
pub fn encode_economic_event<E: Element>(e: &E) -> Result<Vec<u8>> {
    economic_event(e, &mut ParseNotes::new())
}

/// Encode a calendar headline element without building the record
pub fn encode_calendar_event<E: Element>(e: &E) -> Result<Vec<u8>> {
    calendar_event(e, &mut ParseNotes::new())
}

/// Encode a reference data element without building the record
pub fn encode_reference_data<E: Element>(e: &E, correlation_id: u64) -> Result<Vec<u8>> {
    reference_data(e, correlation_id)
}

/// Encode a series headline element without building the record
pub fn encode_macro_headline_event<E: Element>(e: &E, correlation_id: u64) -> Vec<u8> {
    macro_headline_event(e, correlation_id, &mut ParseNotes::new())
}

/// Encode a series calendar element without building the record
pub fn encode_macro_calendar_event<E: Element>(e: &E, correlation_id: u64) -> Result<Vec<u8>> {
    macro_calendar_event(e, correlation_id, &mut ParseNotes::new())
}
