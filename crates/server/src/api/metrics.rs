//! Prometheus metrics recording and background collection.

use std::time::Duration;

use kwrank_core::SearchEngine;
use metrics::{counter, gauge, histogram};

use crate::catalog::CatalogStore;

/// Records HTTP request metrics.
pub fn record_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Records one engine operation (search, list, relevance, ranking, ingest).
pub fn record_engine_operation(operation: &str) {
    counter!(
        "kwrank_operations_total",
        "operation" => operation.to_string()
    )
    .increment(1);
}

/// Updates engine-level Prometheus gauges.
pub fn update_engine_metrics(engine: &SearchEngine, catalog: &CatalogStore) {
    gauge!("kwrank_products_total").set(catalog.len() as f64);
    gauge!("kwrank_indexed_keywords").set(engine.indexed_keywords() as f64);
    gauge!("kwrank_distinct_query_keywords").set(engine.distinct_keywords() as f64);
}
