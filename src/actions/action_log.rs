//! Bounded, frame-indexed action history

use std::collections::VecDeque;

use super::ActionRecord;
use crate::constants::ACTION_LOG_CAPACITY;

/// Ordered history of [`ActionRecord`]s, oldest first.
///
/// Capacity is fixed at construction; appending to a full log evicts the
/// oldest record. Records are appended with non-decreasing frames, so
/// lookups by frame are a binary search.
#[derive(Debug, Clone)]
pub struct ActionLog {
    records: VecDeque<ActionRecord>,
    capacity: usize,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::with_capacity(ACTION_LOG_CAPACITY)
    }
}

impl ActionLog {
    /// Zero capacity is raised to one
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, returning the evicted oldest record if the log was full
    pub fn append(&mut self, record: ActionRecord) -> Option<ActionRecord> {
        debug_assert!(
            self.records.back().is_none_or(|last| last.frame() <= record.frame()),
            "action frames must not go backwards"
        );
        let evicted = if self.records.len() == self.capacity {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    /// Records produced on `frame`, in insertion order. Never removes anything.
    pub fn query(&self, frame: u64) -> impl Iterator<Item = &ActionRecord> + '_ {
        let start = self.records.partition_point(|r| r.frame() < frame);
        self.records
            .range(start..)
            .take_while(move |r| r.frame() == frame)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionRecord> + '_ {
        self.records.iter()
    }

    pub fn oldest_frame(&self) -> Option<u64> {
        self.records.front().map(|r| r.frame())
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

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
