//! Relevance retrieval over ingested catalog resources.

/// Inverted relevance index and resource keyword profiles.
pub mod index;

pub use index::{RelevanceIndex, ResourceRecord};
