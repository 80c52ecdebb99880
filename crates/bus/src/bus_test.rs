//! Notification bus tests
//!
//! Fan-out order, fallback rendering, failure isolation and log
//! suppression.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use econfeed_protocol::{
    CalendarEvent, Encode, Message, Module, ReleaseStatus, SubscriptionStatus,
    SystemStatus, decode_message,
};
use parking_lot::Mutex;
use tempfile::TempDir;

use crate::{FallbackTarget, NotificationBus, Observer};

/// Fallback writer shared with the test
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Records (observer name, buffer) in delivery order
type Deliveries = Arc<Mutex<Vec<(&'static str, Vec<u8>)>>>;

fn recorder(name: &'static str, deliveries: &Deliveries) -> impl Observer + 'static {
    let deliveries = Arc::clone(deliveries);
    move |buffer: &[u8]| deliveries.lock().push((name, buffer.to_vec()))
}

fn calendar_buffer() -> Vec<u8> {
    let mut event = CalendarEvent::new("BBG002SBQ4Q1", "CPI YOY Index");
    event.release_status = ReleaseStatus::Scheduled;
    event.encode()
}

fn quiet_bus() -> (NotificationBus, Captured) {
    let captured = Captured::default();
    (NotificationBus::with_writer(captured.clone()), captured)
}

// ============================================================================
// Fan-out
// ============================================================================

#[test]
fn test_publish_delivers_in_registration_order() {
    let (bus, captured) = quiet_bus();
    let deliveries = Deliveries::default();
    bus.register(recorder("A", &deliveries));
    bus.register(recorder("B", &deliveries));
    bus.register(recorder("C", &deliveries));

    let buffer = calendar_buffer();
    bus.publish(&buffer);

    let deliveries = deliveries.lock();
    let order: Vec<_> = deliveries.iter().map(|(name, _)| *name).collect();
    assert_eq!(order, vec!["A", "B", "C"]);
    assert!(deliveries.iter().all(|(_, received)| received == &buffer));

    // Observed buffers never reach the fallback
    assert!(captured.lines().is_empty());
    assert_eq!(bus.snapshot().deliveries, 3);
}

#[test]
fn test_register_keeps_duplicates() {
    let (bus, _) = quiet_bus();
    let observer = Arc::new(AtomicUsize::new(0));
    let counter: Arc<dyn Observer> = {
        let observer = Arc::clone(&observer);
        Arc::new(move |_: &[u8]| {
            observer.fetch_add(1, Ordering::SeqCst);
        })
    };

    bus.register_shared(Arc::clone(&counter));
    bus.register_shared(counter);
    bus.publish(&calendar_buffer());

    assert_eq!(bus.observer_count(), 2);
    assert_eq!(observer.load(Ordering::SeqCst), 2);
}

#[test]
fn test_panicking_observer_does_not_stop_fan_out() {
    let (bus, _) = quiet_bus();
    let deliveries = Deliveries::default();
    bus.register(recorder("A", &deliveries));
    bus.register(|_: &[u8]| panic!("observer failure"));
    bus.register(recorder("C", &deliveries));

    bus.publish(&calendar_buffer());

    let names: Vec<_> = deliveries.lock().iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["A", "C"]);

    let snapshot = bus.snapshot();
    assert_eq!(snapshot.deliveries, 2);
    assert_eq!(snapshot.observer_failures, 1);
}

#[test]
fn test_observer_may_register_during_publish() {
    let bus = Arc::new(NotificationBus::with_writer(Captured::default()));
    let registered = Arc::new(AtomicUsize::new(0));

    let inner_bus = Arc::clone(&bus);
    let inner_count = Arc::clone(&registered);
    bus.register(move |_: &[u8]| {
        if inner_count.fetch_add(1, Ordering::SeqCst) == 0 {
            inner_bus.register(|_: &[u8]| {});
        }
    });

    bus.publish(&calendar_buffer());
    assert_eq!(bus.observer_count(), 2);
}

// ============================================================================
// Fallback
// ============================================================================

#[test]
fn test_fallback_one_line_per_publish() {
    let (bus, captured) = quiet_bus();

    bus.publish(&calendar_buffer());
    bus.publish(&calendar_buffer());
    bus.publish(&calendar_buffer());

    let lines = captured.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(" type=calendar_event"));
    assert!(lines[0].contains(" global_id=BBG002SBQ4Q1"));
    assert!(lines[0].contains(" short_id=\"CPI YOY Index\""));
    assert!(lines[0].contains(" release_status=SCHEDULED"));
    assert_eq!(bus.snapshot().fallback_lines, 3);
}

#[test]
fn test_fallback_renders_bad_buffer() {
    let (bus, captured) = quiet_bus();

    bus.publish(&[1, 2, 3]);

    let lines = captured.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(" error="));
    assert!(lines[0].ends_with(" bytes=3"));
}

#[test]
fn test_fallback_lines_do_not_interleave() {
    let captured = Captured::default();
    let bus = Arc::new(NotificationBus::with_writer(captured.clone()));
    let buffer = Arc::new(calendar_buffer());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let bus = Arc::clone(&bus);
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || {
                for _ in 0..50 {
                    bus.publish(&buffer);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let lines = captured.lines();
    assert_eq!(lines.len(), 200);
    for line in lines {
        assert_eq!(line.matches(" type=calendar_event").count(), 1);
        assert!(line.ends_with(" release_status=SCHEDULED"));
    }
}

#[test]
fn test_fallback_file_target_appends() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fallback.log");
    std::fs::write(&path, "existing\n").unwrap();

    let bus = NotificationBus::with_target(&FallbackTarget::File(path.clone())).unwrap();
    bus.publish(&calendar_buffer());
    drop(bus);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "existing");
    assert!(lines[1].contains(" type=calendar_event"));
}

#[test]
fn test_fallback_file_target_missing_dir() {
    let dir = TempDir::new().unwrap();
    let target = FallbackTarget::File(dir.path().join("missing").join("fallback.log"));

    let result = NotificationBus::with_target(&target);
    assert!(matches!(result, Err(crate::BusError::OpenFallback { .. })));
}

// ============================================================================
// Log
// ============================================================================

#[test]
fn test_log_publishes_encoded_record() {
    let (bus, _) = quiet_bus();
    let deliveries = Deliveries::default();
    bus.register(recorder("A", &deliveries));

    bus.log(Module::Subscription, SubscriptionStatus::Started, 12, "subscribed");

    let deliveries = deliveries.lock();
    assert_eq!(deliveries.len(), 1);
    let Message::Log(record) = decode_message(&deliveries[0].1).unwrap() else {
        panic!("expected a log record");
    };
    assert_eq!(record.module, Module::Subscription);
    assert_eq!(record.status, SubscriptionStatus::Started.as_u8());
    assert_eq!(record.correlation_id, 12);
    assert_eq!(record.message, "subscribed");
    assert!(!record.timestamp.is_epoch());
}

#[test]
fn test_log_suppressed_module_never_published() {
    let (bus, captured) = quiet_bus();
    let deliveries = Deliveries::default();
    bus.register(recorder("A", &deliveries));

    bus.log(Module::Unknown, SystemStatus::Info, 1, "dropped");

    assert!(deliveries.lock().is_empty());
    assert!(captured.lines().is_empty());
    let snapshot = bus.snapshot();
    assert_eq!(snapshot.publishes, 0);
    assert_eq!(snapshot.suppressed_logs, 1);
}

#[test]
fn test_log_fallback_uses_log_format() {
    let (bus, captured) = quiet_bus();

    bus.log(Module::Session, econfeed_protocol::SessionStatus::ConnectionUp, 0, "connected");

    let lines = captured.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("|Session|ConnectionUp|CorrelationID(0)|connected"));
}

#[test]
fn test_log_fallback_multiline_message_stays_one_line() {
    let (bus, captured) = quiet_bus();

    bus.log(Module::System, SystemStatus::Warning, 7, "first\nsecond\r\tthird");

    let lines = captured.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("|System|Warning|CorrelationID(7)|first\\nsecond\\r\\tthird"));
    assert_eq!(bus.snapshot().fallback_lines, 1);
}
