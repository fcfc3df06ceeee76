//! HTTP request handlers and shared application state.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;

use kwrank_core::config;
use kwrank_core::record::KeywordHit;
use kwrank_core::tokenizer::normalize_keyword;
use kwrank_core::SearchEngine;

use crate::api::errors::ApiError;
use crate::api::metrics;
use crate::api::models::*;
use crate::catalog::CatalogStore;

/// Shared application state passed to every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub engine: SearchEngine,
    pub catalog: Arc<CatalogStore>,
    pub prometheus_handle: PrometheusHandle,
    pub start_time: Instant,
}

fn validate_query(q: &str) -> Result<(), ApiError> {
    if q.trim().is_empty() {
        return Err(ApiError::BadRequest("Search query must not be blank".into()));
    }
    if q.len() > config::MAX_QUERY_BYTES {
        return Err(ApiError::BadRequest(format!(
            "Search query exceeds maximum of {} bytes",
            config::MAX_QUERY_BYTES
        )));
    }
    Ok(())
}

/// `GET /api/keyword-search?q=`
///
/// Records one occurrence of the query and returns the updated hit. This is
/// the only read path that mutates engine state.
pub async fn keyword_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<KeywordHit>, ApiError> {
    validate_query(&params.q)?;
    let hit = state.engine.record_query(&params.q);
    metrics::record_engine_operation("search");
    Ok(Json(hit))
}

/// `GET /api/keyword-search-list?q=top|recent`
///
/// `q=top` returns the ten most frequent keywords; any other value, or none,
/// returns the recent-query log.
pub async fn keyword_search_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let wants_top = params
        .q
        .as_deref()
        .is_some_and(|list| list.eq_ignore_ascii_case("top"));
    if wants_top {
        metrics::record_engine_operation("list_top");
        let entries = state.engine.top_frequent(config::MAX_RANKED_RESULTS);
        let count = entries.len();
        Json(TopKeywordsResponse { entries, count }).into_response()
    } else {
        metrics::record_engine_operation("list_recent");
        let entries = state.engine.recent_queries();
        let count = entries.len();
        Json(RecentQueriesResponse { entries, count }).into_response()
    }
}

/// `GET /api/relevance?q=`
///
/// Ranked (resource URL, occurrences) matches for a single keyword. Reading
/// relevance never touches the frequency structures; a keyword matching
/// nothing returns 200 with an empty list.
pub async fn relevance(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<RelevanceResponse>, ApiError> {
    validate_query(&params.q)?;
    // The response echoes the normalized keyword, not the raw query.
    let keyword = normalize_keyword(&params.q);
    let matches: Vec<RankedResource> = state
        .engine
        .relevance_for(&keyword)
        .into_iter()
        .map(RankedResource::from)
        .collect();
    metrics::record_engine_operation("relevance");
    let count = matches.len();
    Ok(Json(RelevanceResponse {
        query: keyword,
        matches,
        count,
    }))
}

/// `GET /api/page-ranking?q=&limit=`
///
/// Multi-term ranking: resources scored by the sum of their occurrence
/// counts across all query tokens.
pub async fn page_ranking(
    State(state): State<AppState>,
    Query(params): Query<PageRankingParams>,
) -> Result<Json<PageRankingResponse>, ApiError> {
    validate_query(&params.q)?;
    if params.limit == 0 || params.limit > config::MAX_PAGE_RANK_LIMIT {
        return Err(ApiError::BadRequest(format!(
            "limit must be 1-{}",
            config::MAX_PAGE_RANK_LIMIT
        )));
    }
    let query = normalize_keyword(&params.q);
    let results: Vec<RankedResource> = state
        .engine
        .rank_pages(&query, params.limit)
        .into_iter()
        .map(RankedResource::from)
        .collect();
    metrics::record_engine_operation("page_ranking");
    let count = results.len();
    Ok(Json(PageRankingResponse {
        query,
        results,
        count,
    }))
}

/// `GET /api/products`
pub async fn list_products(State(state): State<AppState>) -> Json<ProductsResponse> {
    let products: Vec<ProductResponse> = state
        .catalog
        .products()
        .into_iter()
        .map(ProductResponse::from)
        .collect();
    let count = products.len();
    Json(ProductsResponse { products, count })
}

/// `POST /api/products`
///
/// Appends the batch to the catalog snapshot, then rebuilds the relevance
/// index from the full catalog so new rows are immediately searchable.
pub async fn ingest_products(
    State(state): State<AppState>,
    Json(req): Json<IngestProductsRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    if req.products.is_empty() {
        return Err(ApiError::BadRequest("Product batch must not be empty".into()));
    }
    if req.products.len() > config::MAX_INGEST_BATCH {
        return Err(ApiError::BadRequest(format!(
            "Batch exceeds maximum of {} products",
            config::MAX_INGEST_BATCH
        )));
    }
    for product in &req.products {
        if product.name.trim().is_empty() {
            return Err(ApiError::BadRequest("Product name must not be blank".into()));
        }
        if product.url.trim().is_empty() {
            return Err(ApiError::BadRequest("Product URL must not be blank".into()));
        }
        for field in [&product.name, &product.brand, &product.description] {
            if field.len() > config::MAX_FIELD_BYTES {
                return Err(ApiError::BadRequest(format!(
                    "Product field exceeds maximum of {} bytes",
                    config::MAX_FIELD_BYTES
                )));
            }
        }
    }

    let rows = req.products.into_iter().map(IngestProduct::into_record);
    let added = state
        .catalog
        .append(rows.collect())
        .map_err(|e| {
            tracing::error!("Catalog append failed: {}", e);
            ApiError::Internal("Failed to persist product batch".into())
        })?
        .len();
    state.engine.rebuild_relevance(&state.catalog.products());
    metrics::record_engine_operation("ingest");

    Ok(Json(IngestResponse {
        added,
        total_products: state.catalog.len(),
        indexed_keywords: state.engine.indexed_keywords(),
    }))
}

/// `POST /admin/reset`
///
/// Clears the query-path state (frequency tree, counter, recent log); the
/// relevance index and the catalog stay as they are.
pub async fn reset(State(state): State<AppState>) -> Json<MessageResponse> {
    state.engine.reset_query_state();
    Json(MessageResponse {
        message: "Query state reset".to_string(),
    })
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        products: state.catalog.len(),
        indexed_keywords: state.engine.indexed_keywords(),
        distinct_query_keywords: state.engine.distinct_keywords(),
        recent_queries: state.engine.recent_queries().len(),
    })
}

/// `GET /metrics`
pub async fn metrics_endpoint(State(state): State<AppState>) -> String {
    state.prometheus_handle.render()
}
