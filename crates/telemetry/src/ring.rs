//! Fixed-capacity circular buffer
//!
//! Slots are allocated once; push and pop are O(1) copies and never grow
//! the buffer.

use crate::event::TelemetryEvent;

#[derive(Debug)]
pub(crate) struct Ring {
    slots: Box<[TelemetryEvent]>,
    head: usize,
    count: usize,
}

impl Ring {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![TelemetryEvent::default(); capacity].into_boxed_slice(),
            head: 0,
            count: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Append at the tail; hands the event back when full
    pub fn push(&mut self, event: TelemetryEvent) -> Result<(), TelemetryEvent> {
        if self.is_full() {
            return Err(event);
        }
        let tail = (self.head + self.count) % self.slots.len();
        self.slots[tail] = event;
        self.count += 1;
        Ok(())
    }

    /// Remove the oldest event
    pub fn pop(&mut self) -> Option<TelemetryEvent> {
        if self.is_empty() {
            return None;
        }
        let event = self.slots[self.head];
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        Some(event)
    }
}
