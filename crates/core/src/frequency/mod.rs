//! Query frequency tracking: AVL index, exact counter, recent-query log.
//!
//! Every accepted query updates all three structures in one critical
//! section: the tree aggregates counts per keyword and serves top-K, the
//! counter answers exact lookups, and the log keeps the latest queries in
//! reverse chronological order.

/// Exact per-keyword query counter.
pub mod counter;
/// Bounded, most-recent-first log of query events.
pub mod recent;
/// AVL keyword frequency index.
pub mod tree;

pub use counter::QueryCounter;
pub use recent::RecentQueryLog;
pub use tree::KeywordFrequencyIndex;
