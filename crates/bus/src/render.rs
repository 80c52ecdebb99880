//! Fallback text rendering
//!
//! # Output Format
//!
//! Log records use the module-specific form:
//! ```text
//! 2025-10-10 18:36:21|Subscription|Started|CorrelationID(12)|subscribed
//! ```
//!
//! Every other record is flattened into `key=value` pairs after the time the
//! line was rendered. Absent values (empty text, NaN, epoch times) are left
//! out:
//! ```text
//! 2025-10-10T18:36:21.402Z type=economic_event global_id=BBG002SBQ4Q1 ... value.count=1 value.value=-1.52
//! ```

use std::borrow::Cow;
use std::fmt::{Display, Write};

use chrono::{DateTime, Utc};
use econfeed_protocol::{
    CalendarEvent, EconomicEvent, HeadlineBase, LogRecord, MacroCalendarEvent,
    MacroHeadlineEvent, Measurement, Message, ReferenceData, TimeInterval, Timestamp,
    decode_message,
};

/// Render one buffer as a single line, stamped with the current time
pub fn render(buffer: &[u8]) -> String {
    render_at(buffer, Utc::now())
}

/// Render one buffer as a single line, stamped with `at`
///
/// A buffer that fails verification renders as an error line instead.
pub fn render_at(buffer: &[u8], at: DateTime<Utc>) -> String {
    let stamp = format_line_time(at);
    match decode_message(buffer) {
        Ok(Message::Log(record)) => render_log(&record),
        Ok(message) => render_message(&stamp, &message),
        Err(e) => {
            let mut pairs = Pairs::new(&stamp);
            pairs.text("error", &e.to_string());
            pairs.num("bytes", buffer.len());
            pairs.finish()
        }
    }
}

/// `timestamp|module|status|CorrelationID(n)|message`
pub fn render_log(record: &LogRecord) -> String {
    let time = record
        .timestamp
        .wall_clock()
        .map(|wall| wall.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| record.timestamp.micros.to_string());

    format!(
        "{}|{}|{}|CorrelationID({})|{}",
        time,
        record.module,
        record.status_name(),
        record.correlation_id,
        single_line(&record.message)
    )
}

/// Escape control characters so a message never spans lines
fn single_line(text: &str) -> Cow<'_, str> {
    if !text.contains(char::is_control) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_debug());
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn format_line_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

fn render_message(stamp: &str, message: &Message) -> String {
    let mut pairs = Pairs::new(stamp);
    pairs.raw("type", message.message_type().as_str());

    match message {
        Message::Economic(event) => economic(&mut pairs, event),
        Message::Calendar(event) => calendar(&mut pairs, event),
        Message::Reference(data) => reference(&mut pairs, data),
        Message::MacroHeadline(event) => macro_headline(&mut pairs, event),
        Message::MacroCalendar(event) => macro_calendar(&mut pairs, event),
        // Rendered separately
        Message::Log(record) => pairs.text("message", &record.message),
    }
    pairs.finish()
}

// =============================================================================
// Per-record field lists
// =============================================================================

fn headline(pairs: &mut Pairs, base: &HeadlineBase) {
    pairs.text("global_id", &base.global_id);
    pairs.text("short_id", &base.short_id);
    pairs.text("description", &base.description);
    pairs.raw("kind", base.kind.as_str());
    pairs.raw("subkind", base.subkind.as_str());
    pairs.num("event_id", base.event_id);
    pairs.text("observation_period", &base.observation_period);
    pairs.interval("release", &base.release);
}

fn economic(pairs: &mut Pairs, event: &EconomicEvent) {
    headline(pairs, &event.base);
    pairs.measurement("value", &event.value);
    pairs.measurement("prior_value", &event.prior_value);
    pairs.num("prior_event_id", event.prior_event_id);
    pairs.text("prior_observation_period", &event.prior_observation_period);
    pairs.interval("prior_release", &event.prior_release);
}

fn calendar(pairs: &mut Pairs, event: &CalendarEvent) {
    headline(pairs, &event.base);
    pairs.raw("release_status", event.release_status.as_str());
}

fn reference(pairs: &mut Pairs, data: &ReferenceData) {
    pairs.num("correlation_id", data.correlation_id);
    pairs.text("global_id", &data.global_id);
    pairs.text("short_id", &data.short_id);
    pairs.text("description", &data.description);
    pairs.text("frequency", &data.frequency);
    pairs.text("units", &data.units);
    pairs.text("country_iso", &data.country_iso);
    pairs.text("source", &data.source);
    pairs.text("seasonality", &data.seasonality);
}

fn macro_headline(pairs: &mut Pairs, event: &MacroHeadlineEvent) {
    pairs.num("correlation_id", event.correlation_id);
    pairs.raw("kind", event.kind.as_str());
    pairs.raw("subkind", event.subkind.as_str());
    pairs.num("event_id", event.event_id);
    pairs.text("observation_period", &event.observation_period);
    pairs.interval("release", &event.release);
    pairs.num("prior_event_id", event.prior_event_id);
    pairs.text("prior_observation_period", &event.prior_observation_period);
    pairs.interval("prior_release", &event.prior_release);
    pairs.measurement("value", &event.value);
}

fn macro_calendar(pairs: &mut Pairs, event: &MacroCalendarEvent) {
    pairs.num("correlation_id", event.correlation_id);
    pairs.text("global_id", &event.global_id);
    pairs.text("short_id", &event.short_id);
    pairs.raw("kind", event.kind.as_str());
    pairs.raw("subkind", event.subkind.as_str());
    pairs.text("description", &event.description);
    pairs.num("event_id", event.event_id);
    pairs.text("observation_period", &event.observation_period);
    pairs.interval("release", &event.release);
    pairs.raw("release_status", event.release_status.as_str());
    pairs.float("relevance", event.relevance);
}

// =============================================================================
// Line builder
// =============================================================================

struct Pairs {
    line: String,
}

impl Pairs {
    fn new(stamp: &str) -> Self {
        let mut line = String::with_capacity(256);
        line.push_str(stamp);
        Self { line }
    }

    fn raw(&mut self, key: &str, value: impl Display) {
        let _ = write!(self.line, " {key}={value}");
    }

    fn num(&mut self, key: &str, value: impl Display) {
        self.raw(key, value);
    }

    /// Text, quoted when it would break the pair syntax
    fn text(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        if value.contains(|c: char| c.is_whitespace() || c == '=' || c == '"') {
            self.raw(key, format_args!("{value:?}"));
        } else {
            self.raw(key, value);
        }
    }

    fn float(&mut self, key: &str, value: f64) {
        if !value.is_nan() {
            self.raw(key, value);
        }
    }

    fn time(&mut self, key: &str, value: &Timestamp) {
        if !value.is_epoch() {
            self.raw(key, value);
        }
    }

    fn interval(&mut self, key: &str, value: &TimeInterval) {
        if value.is_point() {
            self.time(key, &value.start);
        } else {
            self.time(&format!("{key}.start"), &value.start);
            self.time(&format!("{key}.end"), &value.end);
        }
    }

    fn measurement(&mut self, key: &str, m: &Measurement) {
        if m.is_absent() {
            return;
        }
        self.num(&format!("{key}.count"), m.count);
        self.float(&format!("{key}.value"), m.value);
        self.float(&format!("{key}.low"), m.low);
        self.float(&format!("{key}.high"), m.high);
        self.float(&format!("{key}.median"), m.median);
        self.float(&format!("{key}.average"), m.average);
        self.float(&format!("{key}.standard_deviation"), m.standard_deviation);
    }

    fn finish(self) -> String {
        self.line
    }
}
