//! Request and response data transfer objects for the REST API.
//!
//! All types derive `Serialize` and/or `Deserialize` for JSON marshalling via Axum.

use kwrank_core::config;
use kwrank_core::ranking::ScoredKey;
use kwrank_core::record::{KeywordHit, ProductRecord, QueryEvent};
use serde::{Deserialize, Serialize};

/// Query string for `GET /api/keyword-search`, `/api/relevance`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// Query string for `GET /api/keyword-search-list`.
///
/// `q=top` selects the most-frequent list; anything else (or nothing) falls
/// back to the recent list.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
}

/// Query string for `GET /api/page-ranking`.
#[derive(Debug, Deserialize)]
pub struct PageRankingParams {
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    config::MAX_RANKED_RESULTS
}

/// One product row in `POST /api/products`. Only the name and the product
/// URL are required; row numbers are assigned by the catalog store.
#[derive(Debug, Deserialize)]
pub struct IngestProduct {
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image_url: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

impl IngestProduct {
    /// Converts to a catalog record with a placeholder row number.
    pub fn into_record(self) -> ProductRecord {
        ProductRecord {
            no: 0,
            name: self.name,
            brand: self.brand,
            price: self.price,
            image_url: self.image_url,
            url: self.url,
            description: self.description,
        }
    }
}

/// Request body for `POST /api/products`.
#[derive(Debug, Deserialize)]
pub struct IngestProductsRequest {
    pub products: Vec<IngestProduct>,
}

/// Response body for `POST /api/products`.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub added: usize,
    pub total_products: usize,
    pub indexed_keywords: usize,
}

/// Response body for `GET /api/keyword-search-list?q=top`.
#[derive(Debug, Serialize)]
pub struct TopKeywordsResponse {
    pub entries: Vec<KeywordHit>,
    pub count: usize,
}

/// Response body for `GET /api/keyword-search-list` (recent list).
#[derive(Debug, Serialize)]
pub struct RecentQueriesResponse {
    pub entries: Vec<QueryEvent>,
    pub count: usize,
}

/// One ranked resource in relevance and page-ranking responses.
#[derive(Debug, Serialize)]
pub struct RankedResource {
    pub url: String,
    pub occurrences: u64,
}

impl From<ScoredKey> for RankedResource {
    fn from(entry: ScoredKey) -> Self {
        Self {
            url: entry.key,
            occurrences: entry.score,
        }
    }
}

/// Response body for `GET /api/relevance`.
#[derive(Debug, Serialize)]
pub struct RelevanceResponse {
    pub query: String,
    pub matches: Vec<RankedResource>,
    pub count: usize,
}

/// Response body for `GET /api/page-ranking`.
#[derive(Debug, Serialize)]
pub struct PageRankingResponse {
    pub query: String,
    pub results: Vec<RankedResource>,
    pub count: usize,
}

/// One product row in `GET /api/products` (JSON field names, unlike the
/// CSV-header names on [`ProductRecord`] itself).
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub no: u32,
    pub name: String,
    pub brand: String,
    pub price: String,
    pub image_url: String,
    pub url: String,
    pub description: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(record: ProductRecord) -> Self {
        Self {
            no: record.no,
            name: record.name,
            brand: record.brand,
            price: record.price,
            image_url: record.image_url,
            url: record.url,
            description: record.description,
        }
    }
}

/// Response body for `GET /api/products`.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<ProductResponse>,
    pub count: usize,
}

/// Generic success message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub products: usize,
    pub indexed_keywords: usize,
    pub distinct_query_keywords: usize,
    pub recent_queries: usize,
}
