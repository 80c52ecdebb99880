//! Element tree to domain record
//!
//! Each parser reads the required identifiers unconditionally and defaults
//! every optional field. One bad sub-field never discards the rest of the
//! record.

use econfeed_protocol::{
    CalendarEvent, EconomicEvent, HeadlineBase, MacroCalendarEvent, MacroHeadlineEvent,
    ReferenceData,
};

use crate::Result;
use crate::element::Element;
use crate::fields::{
    ParseNotes, float, id, interval, kind, measurement, release_status, required_text,
    revision, revision_metadata, subkind, text,
};
use crate::names;

fn headline_base<E: Element>(
    e: &E,
    record: &'static str,
    notes: &mut ParseNotes,
) -> Result<HeadlineBase> {
    Ok(HeadlineBase {
        global_id: required_text(e, names::ID_BB_GLOBAL, record)?,
        short_id: required_text(e, names::PARSEKYABLE_DES, record)?,
        description: text(e, names::DESCRIPTION),
        kind: kind(e),
        subkind: subkind(e),
        event_id: id(e, names::EVENT_ID),
        observation_period: text(e, names::OBSERVATION_PERIOD),
        release: interval(e, names::ECO_RELEASE_DT, notes),
    })
}

pub(crate) fn economic_event<E: Element>(e: &E, notes: &mut ParseNotes) -> Result<EconomicEvent> {
    let base = headline_base(e, names::HEADLINE_ECONOMIC_EVENT, notes)?;
    let prior = revision_metadata(e, notes);

    Ok(EconomicEvent {
        base,
        value: measurement(e, names::VALUE, notes),
        prior_value: measurement(e, names::PRIOR_VALUE, notes),
        prior_event_id: prior.event_id,
        prior_observation_period: prior.observation_period,
        prior_release: prior.release,
    })
}

pub(crate) fn calendar_event<E: Element>(e: &E, notes: &mut ParseNotes) -> Result<CalendarEvent> {
    Ok(CalendarEvent {
        base: headline_base(e, names::HEADLINE_CALENDAR_EVENT, notes)?,
        release_status: release_status(e),
    })
}

pub(crate) fn reference_data<E: Element>(e: &E, correlation_id: u64) -> Result<ReferenceData> {
    const RECORD: &str = names::MACRO_REFERENCE_DATA;

    Ok(ReferenceData {
        correlation_id,
        global_id: required_text(e, names::ID_BB_GLOBAL, RECORD)?,
        short_id: required_text(e, names::PARSEKYABLE_DES, RECORD)?,
        description: text(e, names::DESCRIPTION),
        frequency: text(e, names::INDX_FREQ),
        units: text(e, names::INDX_UNITS),
        country_iso: text(e, names::COUNTRY_ISO),
        source: text(e, names::INDX_SOURCE),
        seasonality: text(e, names::SEASONALITY_AND_TRANSFORMATION),
    })
}

pub(crate) fn macro_headline_event<E: Element>(
    e: &E,
    correlation_id: u64,
    notes: &mut ParseNotes,
) -> MacroHeadlineEvent {
    // Prior fields may come grouped or flattened onto the event itself
    let prior = match e.field(names::REVISION_METADATA) {
        Some(group) => revision(&group, notes),
        None => revision(e, notes),
    };

    MacroHeadlineEvent {
        correlation_id,
        kind: kind(e),
        subkind: subkind(e),
        event_id: id(e, names::EVENT_ID),
        observation_period: text(e, names::OBSERVATION_PERIOD),
        release: interval(e, names::ECO_RELEASE_DT, notes),
        prior_event_id: prior.event_id,
        prior_observation_period: prior.observation_period,
        prior_release: prior.release,
        value: measurement(e, names::VALUE, notes),
    }
}

pub(crate) fn macro_calendar_event<E: Element>(
    e: &E,
    correlation_id: u64,
    notes: &mut ParseNotes,
) -> Result<MacroCalendarEvent> {
    const RECORD: &str = names::MACRO_CALENDAR_EVENT;

    Ok(MacroCalendarEvent {
        correlation_id,
        global_id: required_text(e, names::ID_BB_GLOBAL, RECORD)?,
        short_id: required_text(e, names::PARSEKYABLE_DES, RECORD)?,
        kind: kind(e),
        subkind: subkind(e),
        description: text(e, names::DESCRIPTION),
        event_id: id(e, names::EVENT_ID),
        observation_period: text(e, names::OBSERVATION_PERIOD),
        release: interval(e, names::ECO_RELEASE_DT, notes),
        release_status: release_status(e),
        relevance: float(e, names::RELEVANCE_VALUE),
    })
}

// =============================================================================
// Public entry points
// =============================================================================

/// Parse an economic headline (actual, revision or estimate)
pub fn parse_economic_event<E: Element>(e: &E) -> Result<EconomicEvent> {
    economic_event(e, &mut ParseNotes::new())
}

/// Parse a calendar headline
pub fn parse_calendar_event<E: Element>(e: &E) -> Result<CalendarEvent> {
    calendar_event(e, &mut ParseNotes::new())
}

/// Parse series reference data delivered for a subscription
pub fn parse_reference_data<E: Element>(e: &E, correlation_id: u64) -> Result<ReferenceData> {
    reference_data(e, correlation_id)
}

/// Parse a headline on a subscribed series; no identifiers are required
pub fn parse_macro_headline_event<E: Element>(e: &E, correlation_id: u64) -> MacroHeadlineEvent {
    macro_headline_event(e, correlation_id, &mut ParseNotes::new())
}

/// Parse a calendar entry on a subscribed series
pub fn parse_macro_calendar_event<E: Element>(
    e: &E,
    correlation_id: u64,
) -> Result<MacroCalendarEvent> {
    macro_calendar_event(e, correlation_id, &mut ParseNotes::new())
}
