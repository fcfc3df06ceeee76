//! Bounded, most-recent-first log of query events.

use std::collections::VecDeque;

use crate::config::RECENT_QUERY_CAPACITY;
use crate::record::QueryEvent;

/// Fixed-capacity log of the latest queries, newest first.
///
/// Repeated identical keywords each get their own entry: this is the
/// chronological view, the aggregate view lives in the frequency index.
/// Recording while full silently evicts the oldest entry.
#[derive(Debug, Default)]
pub struct RecentQueryLog {
    entries: VecDeque<QueryEvent>,
}

impl RecentQueryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `event` at the head, evicting the oldest entry when full.
    pub fn record(&mut self, event: QueryEvent) {
        while self.entries.len() >= RECENT_QUERY_CAPACITY {
            self.entries.pop_back();
        }
        self.entries.push_front(event);
    }

    /// Entries from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &QueryEvent> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
