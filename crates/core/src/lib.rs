//! # kwrank-core
//!
//! Embeddable in-memory keyword search and ranking engine: an AVL query
//! frequency index with heap-ranked top-K, a bounded recent-query log, an
//! exact query counter, and an inverted relevance index over ingested
//! catalog resources.
//!
//! This is the core library crate with zero async dependencies — the HTTP
//! API, the catalog store, and runtime wiring live in the server crate.

/// Global configuration constants: limits, defaults, and tuning parameters.
pub mod config;
/// The search engine service object owning all query-path state.
pub mod engine;
/// Query frequency tracking: AVL index, exact counter, recent-query log.
pub mod frequency;
/// Heap-based top-K ranking shared by every ranked surface.
pub mod ranking;
/// Core record types: catalog product rows and query-path events.
pub mod record;
/// Relevance retrieval over ingested catalog resources.
pub mod relevance;
/// Two-mode keyword tokenizer for queries and resource text.
pub mod tokenizer;

pub use engine::SearchEngine;
