//! Lexical overlap between keywords.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pairs with an overlap above this ratio compete with each other.
pub const COMPETING_THRESHOLD: f64 = 0.30;

/// Overlap between two keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordSimilarity {
    /// First keyword, as supplied.
    pub keyword_a: String,
    /// Second keyword, as supplied.
    pub keyword_b: String,
    /// Jaccard index of the two word sets (0--1).
    pub ratio: f64,
}

impl KeywordSimilarity {
    /// Whether the pair overlaps enough to compete for the same queries.
    pub fn is_competing(&self) -> bool {
        self.ratio > COMPETING_THRESHOLD
    }
}

/// Pairwise overlap across a keyword list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SimilarityReport {
    /// Every unordered pair, in input order.
    pub pairs: Vec<KeywordSimilarity>,
}

impl SimilarityReport {
    /// Pairs above [`COMPETING_THRESHOLD`].
    pub fn competing(&self) -> impl Iterator<Item = &KeywordSimilarity> {
        self.pairs.iter().filter(|p| p.is_competing())
    }

    /// Whether no pair competes.
    pub fn is_distinct(&self) -> bool {
        self.competing().next().is_none()
    }
}

/// Jaccard index of the lowercase word sets of two keywords.
///
/// Words are split on single spaces; empty pieces are ignored. Two empty
/// sets have a similarity of 0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let set_a = word_set(&a);
    let set_b = word_set(&b);

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}

fn word_set(keyword: &str) -> HashSet<&str> {
    keyword.split(' ').filter(|w| !w.is_empty()).collect()
}

/// Compare every unordered pair of `keywords`.
#[tracing::instrument(skip_all, fields(keyword_count = keywords.len()))]
pub fn analyze_similarity<S: AsRef<str>>(keywords: &[S]) -> SimilarityReport {
    let mut pairs = Vec::new();
    for (i, a) in keywords.iter().enumerate() {
        for b in &keywords[i + 1..] {
            let (a, b) = (a.as_ref(), b.as_ref());
            pairs.push(KeywordSimilarity {
                keyword_a: a.to_string(),
                keyword_b: b.to_string(),
                ratio: similarity(a, b),
            });
        }
    }
    SimilarityReport { pairs }
}
