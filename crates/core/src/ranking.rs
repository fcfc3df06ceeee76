//! Heap-based top-K ranking shared by every ranked surface.
//!
//! Frequency top-K, relevance matches, and page ranking all go through
//! [`heap_rank`]: push every candidate into a max-heap, then pop at most `k`.
//! Scores are raw occurrence counts. [`ScoredKey`] carries an explicit total
//! order (higher score first, ties broken by ascending key), so two runs over
//! the same data always produce the same ranking.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A ranked entry: a key (keyword or resource URL) with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredKey {
    pub key: String,
    pub score: u64,
}

impl ScoredKey {
    pub fn new(key: impl Into<String>, score: u64) -> Self {
        Self {
            key: key.into(),
            score,
        }
    }
}

impl Ord for ScoredKey {
    /// Max-heap order: higher score wins; equal scores compare keys in
    /// reverse so the lexicographically smaller key surfaces first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl PartialOrd for ScoredKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ranks `entries` by descending score, returning at most `k` of them.
///
/// All candidates go into the heap before any are drained, so the result is
/// a fully sorted prefix regardless of input order.
pub fn heap_rank(entries: impl IntoIterator<Item = ScoredKey>, k: usize) -> Vec<ScoredKey> {
    let mut heap: BinaryHeap<ScoredKey> = entries.into_iter().collect();
    let mut ranked = Vec::with_capacity(k.min(heap.len()));
    while ranked.len() < k {
        match heap.pop() {
            Some(entry) => ranked.push(entry),
            None => break,
        }
    }
    ranked
}
