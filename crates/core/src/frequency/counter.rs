//! Exact per-keyword query counter.

use std::collections::HashMap;

/// Hash-based exact counter over normalized query keywords.
///
/// Kept separate from the frequency tree so count lookups never walk the
/// tree; both structures are updated in the same critical section and agree
/// on every count.
#[derive(Debug, Default)]
pub struct QueryCounter {
    counts: HashMap<String, u64>,
}

impl QueryCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumps the count for `keyword` and returns the new value.
    pub fn increment_and_get(&mut self, keyword: &str) -> u64 {
        let count = self.counts.entry(keyword.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Exact count for `keyword`; zero if it has never been queried.
    pub fn count(&self, keyword: &str) -> u64 {
        self.counts.get(keyword).copied().unwrap_or(0)
    }

    /// Number of distinct keywords counted.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_returns_running_count() {
        let mut counter = QueryCounter::new();
        assert_eq!(counter.increment_and_get("milk"), 1);
        assert_eq!(counter.increment_and_get("milk"), 2);
        assert_eq!(counter.increment_and_get("bread"), 1);
        assert_eq!(counter.len(), 2);
    }

    #[test]
    fn test_unqueried_keyword_counts_zero() {
        let counter = QueryCounter::new();
        assert_eq!(counter.count("mangoes"), 0);
    }

    #[test]
    fn test_clear_resets_counts() {
        let mut counter = QueryCounter::new();
        counter.increment_and_get("milk");
        counter.clear();
        assert!(counter.is_empty());
        assert_eq!(counter.count("milk"), 0);
    }
}
