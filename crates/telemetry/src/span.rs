//! Start/end record pairs for measured operations

use std::time::Instant;

use crate::event::{MetricName, ModuleName};
use crate::queue::TelemetryQueue;

/// Guard pairing a start record with an end record on drop
///
/// The end record reuses the start record's id and carries the elapsed
/// microseconds. When the start was dropped by a full queue, no end record
/// is pushed.
#[must_use = "the end record is pushed when the span is dropped"]
pub struct Span<'a> {
    queue: &'a TelemetryQueue,
    module: ModuleName,
    metric: MetricName,
    event_id: u64,
    started: Instant,
}

impl<'a> Span<'a> {
    pub(crate) fn begin(queue: &'a TelemetryQueue, module: &str, metric: &str) -> Self {
        let event_id = queue.push(module, metric, "start", 0);
        Self {
            queue,
            module: ModuleName::new(module),
            metric: MetricName::new(metric),
            event_id,
            started: Instant::now(),
        }
    }

    /// Id shared by the start and end records; 0 if the start was dropped
    pub fn id(&self) -> u64 {
        self.event_id
    }

    pub fn is_recorded(&self) -> bool {
        self.event_id != 0
    }
}

impl Drop for Span<'_> {
    fn drop(&mut self) {
        if self.event_id == 0 {
            return;
        }
        let elapsed = self.started.elapsed().as_micros();
        self.queue.push(
            self.module.as_str(),
            self.metric.as_str(),
            &format!("end elapsed_us={elapsed}"),
            self.event_id,
        );
    }
}
