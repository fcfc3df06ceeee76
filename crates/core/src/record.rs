//! Core record types: catalog product rows and query-path events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product row from the catalog snapshot.
///
/// Serde field renames mirror the snapshot's CSV header. Legacy six-column
/// snapshots have no `Description` column; `description` then defaults to an
/// empty string. The product URL is the resource identifier everywhere in
/// the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Row number within the snapshot, assigned by the catalog store.
    #[serde(rename = "No")]
    pub no: u32,
    #[serde(rename = "Product Name")]
    pub name: String,
    #[serde(rename = "Brand")]
    pub brand: String,
    /// Display price, kept verbatim (e.g. `$4.99`). Never indexed.
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Image URL")]
    pub image_url: String,
    #[serde(rename = "Product URL")]
    pub url: String,
    #[serde(rename = "Description", default)]
    pub description: String,
}

impl ProductRecord {
    /// The fields whose text feeds the relevance index: name, brand,
    /// description. Price and URL columns are excluded wholesale; the
    /// resource tokenizer additionally drops inline price and URL noise.
    pub fn text_fields(&self) -> [&str; 3] {
        [&self.name, &self.brand, &self.description]
    }
}

/// A recorded query keyword together with its updated occurrence count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordHit {
    pub keyword: String,
    pub count: u64,
    pub timestamp: DateTime<Utc>,
}

/// One entry of the recent-query log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryEvent {
    pub keyword: String,
    pub timestamp: DateTime<Utc>,
}
