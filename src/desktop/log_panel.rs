//! Scrolling log of submission outcomes.

use std::collections::VecDeque;

use crate::desktop::form::LogEntry;

/// Bounded list of log lines; the oldest line is dropped when full.
#[derive(Debug, Clone)]
pub struct LogPanel {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogPanel {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent `rows` entries, oldest first.
    pub fn visible(&self, rows: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(rows))
    }
}
