//! Tests for the domain model

use chrono::{NaiveDate, TimeZone, Utc};

use crate::{
    CalendarEvent, EconomicEvent, EventKind, EventSubkind, LogRecord, MacroCalendarEvent,
    Measurement, Message, MessageType, Module, ReleaseStatus, ServiceStatus, SessionStatus,
    SubscriptionStatus, SystemStatus, TimeInterval, Timestamp, status_name,
};

// =============================================================================
// Timestamp
// =============================================================================

#[test]
fn test_timestamp_from_wall_clock() {
    let wall = NaiveDate::from_ymd_opt(2025, 10, 7)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap();
    let ts = Timestamp::from_wall_clock(wall, 0);
    assert_eq!(ts.micros, 1_759_840_200_000_000);
    assert_eq!(ts.offset, 0);
}

#[test]
fn test_timestamp_offset_is_carried_not_applied() {
    let wall = NaiveDate::from_ymd_opt(2025, 10, 7)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap();
    let utc = Timestamp::from_wall_clock(wall, 0);
    let est = Timestamp::from_wall_clock(wall, -240);
    assert_eq!(utc.micros, est.micros);
    assert_eq!(est.offset, -240);
}

#[test]
fn test_timestamp_from_date_is_midnight() {
    let date = NaiveDate::from_ymd_opt(2025, 10, 7).unwrap();
    let ts = Timestamp::from_date(date, 0);
    assert_eq!(ts.micros, 1_759_795_200_000_000);
}

#[test]
fn test_timestamp_before_epoch_clamps() {
    let wall = NaiveDate::from_ymd_opt(1960, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(Timestamp::from_wall_clock(wall, 0), Timestamp::EPOCH);
}

#[test]
fn test_timestamp_from_utc_keeps_fraction() {
    let instant = Utc.timestamp_opt(1_760_121_381, 250_000_000).unwrap();
    let ts = Timestamp::from_utc(instant);
    assert_eq!(ts.micros, 1_760_121_381_250_000);
}

#[test]
fn test_timestamp_display() {
    let ts = Timestamp::new(1_759_840_200_000_000, 60);
    assert_eq!(ts.to_string(), "2025-10-07T12:30:00.000000+01:00");
}

#[test]
fn test_timestamp_display_unrepresentable_offset() {
    let ts = Timestamp::new(5, i16::MAX);
    assert_eq!(ts.to_string(), "5us+32767m");
}

#[test]
fn test_timestamp_now_is_recent() {
    let ts = Timestamp::now();
    assert!(ts.micros > 1_700_000_000_000_000);
    assert_eq!(ts.offset, 0);
}

#[test]
fn test_interval_point() {
    let at = Timestamp::new(10, 0);
    let interval = TimeInterval::point(at);
    assert!(interval.is_point());
    assert_eq!(interval.start, at);
    assert_eq!(interval.end, at);
    assert!(TimeInterval::default().start.is_epoch());
}

// =============================================================================
// Measurement
// =============================================================================

#[test]
fn test_measurement_single_shape() {
    let m = Measurement::single(-1.52);
    assert_eq!(m.count, 1);
    assert_eq!(m.value, -1.52);
    assert!(m.low.is_nan());
    assert!(m.high.is_nan());
    assert!(m.median.is_nan());
    assert!(m.average.is_nan());
    assert!(m.standard_deviation.is_nan());
}

#[test]
fn test_measurement_distribution_shape() {
    let m = Measurement::distribution(5, 1.0, 3.0, 2.0, 2.1, 0.5);
    assert_eq!(m.count, 5);
    assert!(m.value.is_nan());
    assert_eq!(m.low, 1.0);
    assert_eq!(m.high, 3.0);
    assert_eq!(m.median, 2.0);
    assert_eq!(m.average, 2.1);
    assert_eq!(m.standard_deviation, 0.5);
}

#[test]
fn test_measurement_default_is_absent() {
    let m = Measurement::default();
    assert!(m.is_absent());
    assert_eq!(m.count, 0);
    assert!(!Measurement::single(0.0).is_absent());
}

#[test]
fn test_measurement_equality_treats_nan_as_equal() {
    assert_eq!(Measurement::ABSENT, Measurement::default());
    assert_ne!(Measurement::single(1.0), Measurement::single(2.0));
    assert_ne!(Measurement::single(1.0), Measurement::ABSENT);
}

// =============================================================================
// Enumerations
// =============================================================================

#[test]
fn test_event_kind_parse() {
    assert_eq!(EventKind::parse("ACTUAL"), EventKind::Actual);
    assert_eq!(EventKind::parse("REVISION"), EventKind::Revision);
    assert_eq!(EventKind::parse("ESTIMATE"), EventKind::Estimate);
    assert_eq!(EventKind::parse("CALENDAR"), EventKind::Calendar);
    assert_eq!(EventKind::parse("actual"), EventKind::Unknown);
    assert_eq!(EventKind::parse(""), EventKind::Unknown);
}

#[test]
fn test_event_subkind_parse() {
    assert_eq!(EventSubkind::parse("NEW"), EventSubkind::New);
    assert_eq!(EventSubkind::parse("UPDATE"), EventSubkind::Update);
    assert_eq!(EventSubkind::parse("INITPAINT"), EventSubkind::InitialPaint);
    assert_eq!(EventSubkind::parse("DELETE"), EventSubkind::Delete);
    assert_eq!(EventSubkind::parse("MOVE"), EventSubkind::Unknown);
}

#[test]
fn test_release_status_parse() {
    assert_eq!(ReleaseStatus::parse("RELEASED"), ReleaseStatus::Released);
    assert_eq!(ReleaseStatus::parse("SCHEDULED"), ReleaseStatus::Scheduled);
    assert_eq!(ReleaseStatus::parse("PENDING"), ReleaseStatus::Unknown);
}

#[test]
fn test_enum_byte_values_round_trip() {
    for kind in [
        EventKind::Unknown,
        EventKind::Actual,
        EventKind::Revision,
        EventKind::Estimate,
        EventKind::Calendar,
    ] {
        assert_eq!(EventKind::from_u8(kind.as_u8()), kind);
        assert_eq!(EventKind::parse(kind.as_str()), kind);
    }
    assert_eq!(EventSubkind::from_u8(200), EventSubkind::Unknown);
    assert_eq!(ReleaseStatus::from_u8(2), ReleaseStatus::Scheduled);
}

// =============================================================================
// Log vocabulary
// =============================================================================

#[test]
fn test_module_zero_is_suppressed() {
    assert!(Module::from_u8(0).is_suppressed());
    assert!(Module::from_u8(99).is_suppressed());
    assert!(!Module::Heartbeat.is_suppressed());
}

#[test]
fn test_status_name_per_module() {
    assert_eq!(
        status_name(Module::Subscription, SubscriptionStatus::StreamsActivated.as_u8()),
        "StreamsActivated"
    );
    assert_eq!(
        status_name(Module::Session, SessionStatus::InvalidOptions.as_u8()),
        "InvalidOptions"
    );
    assert_eq!(status_name(Module::Service, ServiceStatus::Opened.as_u8()), "Opened");
    assert_eq!(status_name(Module::System, SystemStatus::Warning.as_u8()), "Warning");
    assert_eq!(status_name(Module::Heartbeat, 1), "Info");
    assert_eq!(status_name(Module::Unknown, 3), "Unknown");
}

#[test]
fn test_same_byte_means_different_status_per_module() {
    assert_eq!(status_name(Module::Session, 3), "ConnectionDown");
    assert_eq!(status_name(Module::Subscription, 3), "Terminated");
    assert_eq!(status_name(Module::Service, 3), "Failure");
}

#[test]
fn test_log_record_new_stamps_time() {
    let log = LogRecord::new(Module::Session, SessionStatus::Started, 3, "up");
    assert!(log.timestamp.micros > 0);
    assert_eq!(log.status, 2);
    assert_eq!(log.status_name(), "Started");
}

// =============================================================================
// Records
// =============================================================================

#[test]
fn test_record_constructors_keep_required_ids() {
    let event = EconomicEvent::new("G", "S");
    assert_eq!(event.base.global_id, "G");
    assert_eq!(event.base.short_id, "S");
    assert_eq!(event.prior_event_id, 0);
    assert!(event.prior_observation_period.is_empty());

    let calendar = CalendarEvent::new("G", "S");
    assert_eq!(calendar.release_status, ReleaseStatus::Unknown);

    let macro_calendar = MacroCalendarEvent::new(4, "G", "S");
    assert_eq!(macro_calendar.correlation_id, 4);
    assert!(macro_calendar.relevance.is_nan());
    assert_eq!(macro_calendar, MacroCalendarEvent::new(4, "G", "S"));
}

#[test]
fn test_message_type_of_each_record() {
    assert_eq!(
        Message::from(EconomicEvent::default()).message_type(),
        MessageType::EconomicEvent
    );
    assert_eq!(
        Message::from(CalendarEvent::default()).message_type(),
        MessageType::CalendarEvent
    );
    assert_eq!(
        Message::from(LogRecord::default()).message_type(),
        MessageType::Log
    );
    assert_eq!(
        Message::from(MacroCalendarEvent::default()).message_type(),
        MessageType::MacroCalendarEvent
    );
}
