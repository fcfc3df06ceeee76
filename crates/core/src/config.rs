//! Global configuration constants for kwrank.
//!
//! All tuning parameters, input validation limits, and server defaults are defined here.
//! These are compile-time constants; runtime configuration is handled via CLI arguments
//! in `main.rs`.

/// Capacity of the recent-query log.
///
/// The log is a fixed-size, most-recent-first window: recording a query while
/// the log is full evicts the oldest entry. Repeated identical queries each
/// get their own entry.
pub const RECENT_QUERY_CAPACITY: usize = 10;

/// Maximum number of entries returned by a ranked retrieval.
///
/// Applies to relevance matches and is the default `k` for frequency top-K
/// and page ranking, so every ranked surface shows at most ten rows unless a
/// caller asks for fewer.
pub const MAX_RANKED_RESULTS: usize = 10;

/// Upper bound on the `limit` parameter accepted by page ranking.
pub const MAX_PAGE_RANK_LIMIT: usize = 100;

/// Maximum accepted query length in bytes.
///
/// Longer inputs are rejected at the API boundary before reaching the engine.
pub const MAX_QUERY_BYTES: usize = 512;

/// Maximum number of product rows per ingestion request.
pub const MAX_INGEST_BATCH: usize = 1_000;

/// Maximum length of a single product text field in bytes.
pub const MAX_FIELD_BYTES: usize = 4_096;

/// Default HTTP server port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default directory for the catalog snapshot.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default catalog snapshot file name inside the data directory.
pub const DEFAULT_CATALOG_FILE: &str = "products.csv";

/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum HTTP request body size in bytes (1 MB).
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Interval (in seconds) between engine gauge refreshes.
pub const GAUGE_REFRESH_INTERVAL_SECS: u64 = 15;
