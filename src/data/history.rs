//! Bounded rolling history of telemetry records.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::source::CHANNEL_COUNT;

/// Default number of records kept (about two minutes at the 2 s interval).
pub const DEFAULT_CAPACITY: usize = 60;

/// A single processed telemetry record.
///
/// Never mutated after creation: the alarm flag reflects the threshold in
/// effect when the sample was processed, and stays that way even if the
/// threshold changes later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryRecord {
    /// Wall-clock time the sample was processed.
    pub time: DateTime<Utc>,
    /// Channel readings, in wire order.
    pub channels: [f64; CHANNEL_COUNT],
    /// Whether any channel exceeded the threshold at processing time.
    pub alarm: bool,
}

/// Fixed-capacity FIFO buffer of recent records.
///
/// Insertion order is arrival order; once full, each push evicts the
/// oldest record. `len() <= capacity()` holds at all times.
#[derive(Debug, Clone)]
pub struct History {
    records: VecDeque<HistoryRecord>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create an empty history with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty history with a custom capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, evicting the oldest if the buffer is full.
    pub fn push(&mut self, record: HistoryRecord) {
        self.records.push_back(record);
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    /// The most recent record, if any.
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.back()
    }
}
