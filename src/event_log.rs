//! Bounded session event log.
//!
//! Observability only — never authoritative state. Fixed capacity with
//! eviction-on-append (a ring buffer), so a long session cannot grow the log
//! without bound.

use std::collections::VecDeque;

/// Retained entries: the 10 most recent plus the newest appended.
pub const LOG_CAPACITY: usize = 11;

/// Capped ordered sequence of timestamped log lines, oldest first.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl EventLog {
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Append a timestamped entry, evicting the oldest at capacity.
    pub fn push(&mut self, message: &str) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.entries.push_back(format!("[{stamp}] {message}"));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of all retained entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
