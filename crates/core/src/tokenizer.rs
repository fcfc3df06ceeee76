//! Two-mode keyword tokenizer shared by the query path and the catalog
//! indexing path.
//!
//! Both modes lowercase the input, strip every character outside
//! `[a-z0-9'-]`, and drop tokens that end up empty. They differ in their
//! secondary delimiter: queries split on whitespace and commas, resource
//! text splits on whitespace and hyphens and additionally discards price
//! markers (`$…`) and URLs (`http…`). Hyphens carry meaning inside queries
//! ("gluten-free") but act as word separators in product names.

use std::collections::HashMap;

/// Occurrence counts per token, accumulated over one piece of text.
pub type TokenCounts = HashMap<String, u64>;

/// Normalizes a raw query into its canonical keyword form: trimmed and
/// lowercased. The whole query is a single keyword; multi-term handling
/// belongs to [`tokenize_query`] and page ranking.
pub fn normalize_keyword(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Tokenizes a search query: whitespace and commas separate tokens.
pub fn tokenize_query(text: &str) -> TokenCounts {
    let buffer = text.to_lowercase();
    let mut counts = TokenCounts::new();
    for chunk in buffer.split_whitespace() {
        for part in chunk.split(',') {
            push_token(&mut counts, part);
        }
    }
    counts
}

/// Tokenizes product text: whitespace and hyphens separate tokens.
///
/// Any whitespace-delimited chunk starting with `$` or `http` is discarded
/// before the hyphen split, so prices and URLs embedded in free text never
/// reach the index.
pub fn tokenize_resource(text: &str) -> TokenCounts {
    let buffer = text.to_lowercase();
    let mut counts = TokenCounts::new();
    for chunk in buffer.split_whitespace() {
        if chunk.starts_with('$') || chunk.starts_with("http") {
            continue;
        }
        for part in chunk.split('-') {
            push_token(&mut counts, part);
        }
    }
    counts
}

/// Strips disallowed characters from `raw` and counts the survivor, if any.
fn push_token(counts: &mut TokenCounts, raw: &str) {
    let token: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '\'' || *c == '-')
        .collect();
    if !token.is_empty() {
        *counts.entry(token).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_tokens(counts: &TokenCounts) -> Vec<(String, u64)> {
        let mut tokens: Vec<(String, u64)> = counts
            .iter()
            .map(|(t, c)| (t.clone(), *c))
            .collect();
        tokens.sort();
        tokens
    }

    #[test]
    fn test_query_splits_on_whitespace_and_commas() {
        let counts = tokenize_query("milk,bread eggs");
        assert_eq!(
            sorted_tokens(&counts),
            vec![
                ("bread".to_string(), 1),
                ("eggs".to_string(), 1),
                ("milk".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_query_keeps_hyphens() {
        let counts = tokenize_query("gluten-free bread");
        assert_eq!(counts.get("gluten-free"), Some(&1));
        assert_eq!(counts.get("bread"), Some(&1));
        assert!(!counts.contains_key("gluten"));
    }

    #[test]
    fn test_query_lowercases_and_strips_punctuation() {
        let counts = tokenize_query("Milk! (2%)");
        assert_eq!(counts.get("milk"), Some(&1));
        assert_eq!(counts.get("2"), Some(&1));
    }

    #[test]
    fn test_query_counts_repeats() {
        let counts = tokenize_query("milk milk, milk");
        assert_eq!(counts.get("milk"), Some(&3));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_resource_splits_on_hyphens() {
        let counts = tokenize_resource("Gluten-Free Multigrain Bread");
        assert_eq!(counts.get("gluten"), Some(&1));
        assert_eq!(counts.get("free"), Some(&1));
        assert_eq!(counts.get("multigrain"), Some(&1));
        assert_eq!(counts.get("bread"), Some(&1));
        assert!(!counts.contains_key("gluten-free"));
    }

    #[test]
    fn test_resource_drops_prices_and_urls() {
        let counts = tokenize_resource("Milk $4.99 https://shop.example.com/milk HTTP://ALT");
        assert_eq!(counts.get("milk"), Some(&1));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_resource_keeps_apostrophes() {
        let counts = tokenize_resource("Baker's Dozen");
        assert_eq!(counts.get("baker's"), Some(&1));
        assert_eq!(counts.get("dozen"), Some(&1));
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        assert!(tokenize_query("").is_empty());
        assert!(tokenize_query("  ,, !! ").is_empty());
        assert!(tokenize_resource("$9.99 $1.50").is_empty());
    }

    #[test]
    fn test_normalize_keyword() {
        assert_eq!(normalize_keyword("  Whole Milk "), "whole milk");
        assert_eq!(normalize_keyword("EGGS"), "eggs");
    }

    #[test]
    fn test_non_ascii_characters_stripped() {
        let counts = tokenize_query("café");
        assert_eq!(counts.get("caf"), Some(&1));
    }
}
