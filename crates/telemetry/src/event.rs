//! Fixed-size telemetry records
//!
//! Every field has a fixed byte capacity so a record can sit in a
//! preallocated ring slot and be copied under the lock without allocating.

use std::fmt;

/// Inline UTF-8 string holding at most `N - 1` bytes
///
/// Longer input is cut at the last char boundary that fits.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FixedStr<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> FixedStr<N> {
    /// Maximum stored length in bytes (one byte is kept for a terminator)
    pub const CAPACITY: usize = N - 1;

    pub const fn empty() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    /// Copy `s`, truncating at a char boundary
    pub fn new(s: &str) -> Self {
        let mut end = s.len().min(Self::CAPACITY);
        while !s.is_char_boundary(end) {
            end -= 1;
        }

        let mut bytes = [0; N];
        bytes[..end].copy_from_slice(&s.as_bytes()[..end]);
        Self { bytes, len: end }
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const N: usize> From<&str> for FixedStr<N> {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Module name (31 bytes)
pub type ModuleName = FixedStr<32>;

/// Metric name (31 bytes)
pub type MetricName = FixedStr<32>;

/// Free-text message (255 bytes)
pub type EventMessage = FixedStr<256>;

/// One profiler record
///
/// Two records sharing a non-zero `event_id` are the start and end of one
/// measured operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetryEvent {
    pub module: ModuleName,
    pub metric: MetricName,
    pub message: EventMessage,
    pub event_id: u64,
}

impl TelemetryEvent {
    pub fn new(module: &str, metric: &str, message: &str, event_id: u64) -> Self {
        Self {
            module: ModuleName::new(module),
            metric: MetricName::new(metric),
            message: EventMessage::new(message),
            event_id,
        }
    }

    /// File line: `micros|event_id|module|metric|message`
    ///
    /// Field text is kept on one line and free of the separator: `|`
    /// becomes `/` and control characters become spaces.
    pub fn to_line(&self, micros: i64) -> String {
        let mut line = format!("{}|{}|", micros, self.event_id);
        push_field(&mut line, self.module.as_str());
        line.push('|');
        push_field(&mut line, self.metric.as_str());
        line.push('|');
        push_field(&mut line, self.message.as_str());
        line
    }
}

fn push_field(line: &mut String, text: &str) {
    line.extend(text.chars().map(|c| match c {
        '|' => '/',
        c if c.is_control() => ' ',
        c => c,
    }));
}
