//! kwrank-server — HTTP server for kwrank.
//!
//! Provides the REST API and the CSV catalog store.
//! Core search and ranking logic lives in `kwrank-core`.

/// REST API layer: Axum router, HTTP handlers, models, metrics.
pub mod api;
/// CSV catalog store for product rows.
pub mod catalog;
