//! Inverted relevance index over the product catalog.
//!
//! Maps each keyword to the resources containing it, with raw occurrence
//! counts. Built in one pass over a catalog batch and read-only until the
//! next rebuild. Scoring is occurrence count only: no length normalization
//! and no IDF weighting.

use std::collections::HashMap;

use crate::config::MAX_RANKED_RESULTS;
use crate::ranking::{heap_rank, ScoredKey};
use crate::record::ProductRecord;
use crate::tokenizer::{normalize_keyword, tokenize_query, tokenize_resource};

/// One resource's keyword profile: its URL plus per-keyword occurrence
/// counts across the product's text fields.
#[derive(Debug, Clone, Default)]
pub struct ResourceRecord {
    pub url: String,
    pub keyword_counts: HashMap<String, u64>,
}

impl ResourceRecord {
    /// Derives a resource's keyword profile from a product row.
    pub fn from_product(product: &ProductRecord) -> Self {
        let mut keyword_counts = HashMap::new();
        for field in product.text_fields() {
            for (token, count) in tokenize_resource(field) {
                *keyword_counts.entry(token).or_insert(0) += count;
            }
        }
        Self {
            url: product.url.clone(),
            keyword_counts,
        }
    }

    /// Sum of this resource's occurrence counts across `terms`, which is its
    /// page ranking score for a multi-term query.
    pub fn rank_for<'a>(&self, terms: impl IntoIterator<Item = &'a str>) -> u64 {
        terms
            .into_iter()
            .filter_map(|term| self.keyword_counts.get(term))
            .sum()
    }

    fn merge(&mut self, other: ResourceRecord) {
        for (token, count) in other.keyword_counts {
            *self.keyword_counts.entry(token).or_insert(0) += count;
        }
    }
}

/// Inverted index: keyword → (resource URL → occurrence count), plus the
/// forward resource profiles used by page ranking.
#[derive(Debug, Default)]
pub struct RelevanceIndex {
    postings: HashMap<String, HashMap<String, u64>>,
    resources: Vec<ResourceRecord>,
}

impl RelevanceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from a catalog batch.
    ///
    /// Rows sharing a URL are merged into one resource profile, so the
    /// postings never double-count a keyword per resource pair.
    pub fn build(products: &[ProductRecord]) -> Self {
        let mut index = Self::new();
        let mut by_url: HashMap<String, usize> = HashMap::new();
        for product in products {
            let record = ResourceRecord::from_product(product);
            match by_url.get(&record.url) {
                Some(&slot) => index.resources[slot].merge(record),
                None => {
                    by_url.insert(record.url.clone(), index.resources.len());
                    index.resources.push(record);
                }
            }
        }
        for resource in &index.resources {
            for (token, count) in &resource.keyword_counts {
                *index
                    .postings
                    .entry(token.clone())
                    .or_default()
                    .entry(resource.url.clone())
                    .or_insert(0) += count;
            }
        }
        index
    }

    /// Ranked matches for a single keyword: resource URLs by descending
    /// occurrence count, ties by ascending URL, at most
    /// [`MAX_RANKED_RESULTS`]. A keyword absent from every resource returns
    /// an empty list.
    pub fn query(&self, keyword: &str) -> Vec<ScoredKey> {
        let normalized = normalize_keyword(keyword);
        let Some(matches) = self.postings.get(&normalized) else {
            return Vec::new();
        };
        let entries = matches
            .iter()
            .map(|(url, count)| ScoredKey::new(url.clone(), *count));
        heap_rank(entries, MAX_RANKED_RESULTS)
    }

    /// Multi-term page ranking: every resource is scored by the sum of its
    /// occurrence counts across the query's tokens, and the `k` best are
    /// returned. Resources matching no token are left out.
    pub fn rank_resources(&self, query: &str, k: usize) -> Vec<ScoredKey> {
        let terms = tokenize_query(query);
        let scored = self.resources.iter().filter_map(|resource| {
            let score = resource.rank_for(terms.keys().map(String::as_str));
            if score > 0 {
                Some(ScoredKey::new(resource.url.clone(), score))
            } else {
                None
            }
        });
        heap_rank(scored, k)
    }

    /// Number of distinct keywords in the postings.
    pub fn keyword_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of indexed resources.
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
