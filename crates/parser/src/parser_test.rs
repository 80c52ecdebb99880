//! Parser front end tests
//!
//! Bus reporting of anomalies and failures, publishing, and telemetry spans.

use std::fs;
use std::sync::Arc;

use econfeed_bus::NotificationBus;
use econfeed_protocol::{Message, Module, SystemStatus, decode_message};
use econfeed_telemetry::{QueueConfig, TelemetryQueue};
use parking_lot::Mutex;
use tempfile::TempDir;

use crate::error::ParseError;
use crate::fixtures::*;
use crate::names;
use crate::node::ElementNode;
use crate::parser::Parser;

/// Bus whose only observer collects decoded messages
fn collecting_bus() -> (Arc<NotificationBus>, Arc<Mutex<Vec<Message>>>) {
    let bus = Arc::new(NotificationBus::with_writer(std::io::sink()));
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    bus.register(move |buffer: &[u8]| sink.lock().push(decode_message(buffer).unwrap()));
    (bus, received)
}

fn logs(received: &Mutex<Vec<Message>>) -> Vec<econfeed_protocol::LogRecord> {
    received
        .lock()
        .iter()
        .filter_map(|m| match m {
            Message::Log(record) => Some(record.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_parse_without_side_channels() {
    let parser = Parser::new();
    let message = parser.parse(&economic_event(), 0).unwrap();
    assert!(matches!(message, Message::Economic(_)));
}

#[test]
fn test_anomaly_reported_as_warning() {
    let (bus, received) = collecting_bus();
    let parser = Parser::new().with_bus(bus);
    let tree = identified(names::HEADLINE_ECONOMIC_EVENT)
        .with(ElementNode::choice(names::VALUE, ElementNode::text("RANGE", "1-2")));

    parser.parse(&tree, 9).unwrap();

    let logs = logs(&received);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].module, Module::System);
    assert_eq!(logs[0].status, SystemStatus::Warning.as_u8());
    assert_eq!(logs[0].correlation_id, 9);
    assert_eq!(logs[0].message, "unrecognized variant 'RANGE' in VALUE, using defaults");
}

#[test]
fn test_failure_reported_as_error_and_returned() {
    let (bus, received) = collecting_bus();
    let parser = Parser::new().with_bus(bus);
    let tree = ElementNode::sequence(names::HEADLINE_CALENDAR_EVENT);

    let err = parser.encode(&tree, 4).unwrap_err();
    assert!(matches!(err, ParseError::MissingField { .. }));

    let logs = logs(&received);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, SystemStatus::Error.as_u8());
    assert_eq!(logs[0].message, err.to_string());
}

#[test]
fn test_process_publishes_encoded_record() {
    let (bus, received) = collecting_bus();
    let parser = Parser::new().with_bus(bus);

    parser.process(&macro_calendar_event(), 31).unwrap();

    let received = received.lock();
    assert_eq!(received.len(), 1);
    let Message::MacroCalendar(event) = &received[0] else {
        panic!("expected a macro calendar event");
    };
    assert_eq!(event.correlation_id, 31);
    assert_eq!(event.relevance, 87.5);
}

#[test]
fn test_process_failure_publishes_only_the_error_log() {
    let (bus, received) = collecting_bus();
    let parser = Parser::new().with_bus(bus);

    assert!(parser.process(&ElementNode::sequence("Unknown"), 0).is_err());
    let received = received.lock();
    assert_eq!(received.len(), 1);
    assert!(matches!(received[0], Message::Log(_)));
}

#[test]
fn test_telemetry_span_per_call() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profile.log");
    let queue = Arc::new(TelemetryQueue::start(QueueConfig::new(&path)).unwrap());
    let parser = Parser::new().with_telemetry(Arc::clone(&queue));

    parser.parse(&economic_event(), 0).unwrap();
    parser.encode(&calendar_event(), 0).unwrap();
    queue.stop();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].ends_with("|1|parser|HeadlineEconomicEvent|start"));
    assert!(lines[1].contains("|1|parser|HeadlineEconomicEvent|end elapsed_us="));
    assert!(lines[2].ends_with("|2|parser|HeadlineCalendarEvent|start"));
    assert!(lines[3].contains("|2|parser|HeadlineCalendarEvent|end elapsed_us="));
}
