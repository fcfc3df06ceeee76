//! The search engine service object.
//!
//! A [`SearchEngine`] owns every mutable structure of the query path (the
//! AVL frequency index, the exact counter, and the recent-query log) plus
//! the relevance index built from the product catalog. All state sits behind
//! one `RwLock`: a mutation holds the write lock for its full duration, so
//! no reader ever observes a tree mid-rotation or a half-applied query.
//! Cloning an engine produces a new handle to the same shared state.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use crate::frequency::{KeywordFrequencyIndex, QueryCounter, RecentQueryLog};
use crate::ranking::ScoredKey;
use crate::record::{KeywordHit, ProductRecord, QueryEvent};
use crate::relevance::RelevanceIndex;
use crate::tokenizer::normalize_keyword;

/// Engine state guarded by the service lock.
#[derive(Debug, Default)]
struct EngineState {
    frequency: KeywordFrequencyIndex,
    counter: QueryCounter,
    recent: RecentQueryLog,
    relevance: RelevanceIndex,
}

/// Clone-able handle to the keyword search and ranking engine.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    state: Arc<RwLock<EngineState>>,
}

impl SearchEngine {
    /// Creates an engine with empty query state and an empty relevance
    /// index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine whose relevance index is built from `products`.
    /// The build completes before the handle is returned, so queries never
    /// observe a partial index.
    pub fn with_catalog(products: &[ProductRecord]) -> Self {
        let engine = Self::new();
        engine.rebuild_relevance(products);
        engine
    }

    /// Records one occurrence of a query and returns the updated hit.
    ///
    /// The trimmed, lowercased query is treated as a single keyword even
    /// when it contains spaces. The frequency tree, the exact counter, and
    /// the recent log are all updated under one write lock, so no reader
    /// sees one structure updated without the others.
    pub fn record_query(&self, query: &str) -> KeywordHit {
        let keyword = normalize_keyword(query);
        let timestamp = Utc::now();
        let count = {
            let mut state = self.state.write();
            state.frequency.insert_or_increment(&keyword);
            state.recent.record(QueryEvent {
                keyword: keyword.clone(),
                timestamp,
            });
            state.counter.increment_and_get(&keyword)
        };
        tracing::debug!(keyword = %keyword, count, "Recorded query");
        KeywordHit {
            keyword,
            count,
            timestamp,
        }
    }

    /// Exact occurrence count for a query; zero when never seen.
    pub fn query_count(&self, query: &str) -> u64 {
        let keyword = normalize_keyword(query);
        self.state.read().counter.count(&keyword)
    }

    /// The `k` most frequent keywords, descending count, ties by ascending
    /// keyword. Stamped with the retrieval time.
    pub fn top_frequent(&self, k: usize) -> Vec<KeywordHit> {
        let ranked = self.state.read().frequency.top_k(k);
        let timestamp = Utc::now();
        ranked
            .into_iter()
            .map(|entry| KeywordHit {
                keyword: entry.key,
                count: entry.score,
                timestamp,
            })
            .collect()
    }

    /// Recent query events, most recent first.
    pub fn recent_queries(&self) -> Vec<QueryEvent> {
        self.state.read().recent.iter().cloned().collect()
    }

    /// Ranked (resource URL, occurrences) matches for a single keyword.
    /// Reading never mutates any structure; unknown keywords yield an empty
    /// list.
    pub fn relevance_for(&self, query: &str) -> Vec<ScoredKey> {
        self.state.read().relevance.query(query)
    }

    /// Multi-term page ranking over the relevance index: resources scored
    /// by the sum of their occurrence counts across all query tokens.
    pub fn rank_pages(&self, query: &str, k: usize) -> Vec<ScoredKey> {
        self.state.read().relevance.rank_resources(query, k)
    }

    /// Replaces the relevance index with one built from a fresh catalog
    /// batch. The build runs outside the lock; the swap is a single store.
    pub fn rebuild_relevance(&self, products: &[ProductRecord]) {
        let index = RelevanceIndex::build(products);
        let keywords = index.keyword_count();
        let resources = index.resource_count();
        self.state.write().relevance = index;
        tracing::info!(resources, keywords, "Relevance index rebuilt");
    }

    /// Clears the query-path state (tree, counter, recent log). The
    /// relevance index is left untouched.
    pub fn reset_query_state(&self) {
        let mut state = self.state.write();
        state.frequency = KeywordFrequencyIndex::new();
        state.counter.clear();
        state.recent.clear();
        drop(state);
        tracing::info!("Query state reset");
    }

    /// Number of distinct keywords ever queried.
    pub fn distinct_keywords(&self) -> usize {
        self.state.read().frequency.len()
    }

    /// Number of resources in the relevance index.
    pub fn indexed_resources(&self) -> usize {
        self.state.read().relevance.resource_count()
    }

    /// Number of distinct keywords in the relevance index.
    pub fn indexed_keywords(&self) -> usize {
        self.state.read().relevance.keyword_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(no: u32, name: &str, url: &str) -> ProductRecord {
        ProductRecord {
            no,
            name: name.to_string(),
            brand: "Fresh Farms".to_string(),
            price: "$2.99".to_string(),
            image_url: format!("https://img.example.com/{no}.jpg"),
            url: url.to_string(),
            description: String::new(),
        }
    }

    fn engine_with_groceries() -> SearchEngine {
        SearchEngine::with_catalog(&[
            product(1, "Whole Milk", "https://shop.example.com/whole-milk"),
            product(2, "Milk Chocolate Milk", "https://shop.example.com/choc-milk"),
            product(3, "Sourdough Bread", "https://shop.example.com/bread"),
        ])
    }

    // ── Query recording ────────────────────────────────────────────────

    #[test]
    fn test_record_query_counts_up() {
        let engine = SearchEngine::new();
        assert_eq!(engine.record_query("milk").count, 1);
        assert_eq!(engine.record_query("milk").count, 2);
        assert_eq!(engine.record_query("bread").count, 1);
        assert_eq!(engine.query_count("milk"), 2);
        assert_eq!(engine.distinct_keywords(), 2);
    }

    #[test]
    fn test_record_query_normalizes() {
        let engine = SearchEngine::new();
        engine.record_query("  Milk ");
        let hit = engine.record_query("MILK");
        assert_eq!(hit.keyword, "milk");
        assert_eq!(hit.count, 2);
    }

    #[test]
    fn test_multi_word_query_is_one_keyword() {
        let engine = SearchEngine::new();
        let hit = engine.record_query("Whole Milk");
        assert_eq!(hit.keyword, "whole milk");
        assert_eq!(engine.query_count("whole milk"), 1);
        assert_eq!(engine.query_count("whole"), 0);
    }

    #[test]
    fn test_unseen_query_counts_zero() {
        let engine = SearchEngine::new();
        assert_eq!(engine.query_count("mangoes"), 0);
    }

    #[test]
    fn test_counter_agrees_with_tree_ranking() {
        let engine = SearchEngine::new();
        for _ in 0..5 {
            engine.record_query("milk");
        }
        for _ in 0..2 {
            engine.record_query("bread");
            engine.record_query("eggs");
        }
        let top = engine.top_frequent(3);
        for hit in &top {
            assert_eq!(hit.count, engine.query_count(&hit.keyword));
        }
        let keywords: Vec<&str> = top.iter().map(|h| h.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["milk", "bread", "eggs"]);
    }

    #[test]
    fn test_recent_log_window() {
        let engine = SearchEngine::new();
        for i in 0..11 {
            engine.record_query(&format!("query{i}"));
        }
        let recent = engine.recent_queries();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].keyword, "query10");
        assert_eq!(recent[9].keyword, "query1");
    }

    // ── Relevance ──────────────────────────────────────────────────────

    #[test]
    fn test_relevance_ranks_matching_resources() {
        let engine = engine_with_groceries();
        let matches = engine.relevance_for("milk");
        assert_eq!(matches[0].key, "https://shop.example.com/choc-milk");
        assert_eq!(matches[0].score, 2);
        assert_eq!(matches[1].score, 1);
    }

    #[test]
    fn test_relevance_read_is_idempotent() {
        let engine = engine_with_groceries();
        let first = engine.relevance_for("milk");
        let second = engine.relevance_for("milk");
        assert_eq!(first, second);
    }

    #[test]
    fn test_relevance_unknown_keyword_is_empty() {
        let engine = engine_with_groceries();
        assert!(engine.relevance_for("mangoes").is_empty());
    }

    #[test]
    fn test_rank_pages_multi_term() {
        let engine = engine_with_groceries();
        let ranked = engine.rank_pages("milk bread", 10);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].key, "https://shop.example.com/choc-milk");
    }

    #[test]
    fn test_rebuild_replaces_index() {
        let engine = engine_with_groceries();
        engine.rebuild_relevance(&[product(1, "Almond Butter", "https://shop.example.com/butter")]);
        assert!(engine.relevance_for("milk").is_empty());
        assert_eq!(engine.relevance_for("almond").len(), 1);
        assert_eq!(engine.indexed_resources(), 1);
    }

    // ── Reset and concurrency ──────────────────────────────────────────

    #[test]
    fn test_reset_keeps_relevance() {
        let engine = engine_with_groceries();
        engine.record_query("milk");
        engine.reset_query_state();
        assert_eq!(engine.query_count("milk"), 0);
        assert!(engine.recent_queries().is_empty());
        assert_eq!(engine.distinct_keywords(), 0);
        assert!(!engine.relevance_for("milk").is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let engine = SearchEngine::new();
        let handle = engine.clone();
        handle.record_query("milk");
        assert_eq!(engine.query_count("milk"), 1);
    }

    #[test]
    fn test_concurrent_recording_loses_nothing() {
        let engine = SearchEngine::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        engine.record_query("milk");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(engine.query_count("milk"), 1000);
        assert_eq!(engine.top_frequent(1)[0].count, 1000);
    }
}
