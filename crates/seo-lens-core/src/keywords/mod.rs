//! Keyword usage analysis.
//!
//! Splits a comma-separated keyword list, analyzes each keyword's placement
//! on the page in the order supplied, and compares the keywords with each
//! other when there is more than one.

pub mod occurrences;
pub mod placement;
pub mod similarity;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use occurrences::{count_occurrences, find_occurrences};
pub use placement::{DensityRating, HeadingCounts, KeywordPlacement, analyze_placement};
pub use similarity::{KeywordSimilarity, SimilarityReport, analyze_similarity, similarity};

use crate::document::Document;
use crate::error::{AnalysisError, AnalysisResult};

/// Keyword usage across a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordUsageReport {
    /// One placement per keyword, in input order.
    pub keywords: Vec<KeywordPlacement>,
    /// Pairwise overlap; present only with two or more keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<SimilarityReport>,
}

/// Split a comma-separated keyword list.
///
/// Entries are trimmed and empty entries dropped. Returns
/// [`AnalysisError::NoKeywords`] when nothing is left.
pub fn parse_keywords(input: &str) -> AnalysisResult<Vec<String>> {
    let keywords: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();

    if keywords.is_empty() {
        return Err(AnalysisError::NoKeywords);
    }
    Ok(keywords)
}

/// Analyze every keyword in `input` against `document`.
#[tracing::instrument(skip(document))]
pub fn analyze_keyword_usage<D: Document + ?Sized>(
    document: &D,
    input: &str,
) -> AnalysisResult<KeywordUsageReport> {
    let keywords = parse_keywords(input)?;
    tracing::debug!(count = keywords.len(), "analyzing keywords");

    let placements = keywords
        .iter()
        .map(|keyword| analyze_placement(document, keyword))
        .collect();

    let similarity = (keywords.len() > 1).then(|| analyze_similarity(keywords.as_slice()));

    Ok(KeywordUsageReport {
        keywords: placements,
        similarity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{HeadingLevel, PageDocument};

    #[test]
    fn parse_trims_and_drops_empties() {
        let keywords = parse_keywords(" solar energy, ,wind power ,, ").unwrap();
        assert_eq!(keywords, vec!["solar energy", "wind power"]);
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert!(matches!(parse_keywords(""), Err(AnalysisError::NoKeywords)));
        assert!(matches!(parse_keywords(" , ,"), Err(AnalysisError::NoKeywords)));
    }

    #[test]
    fn single_keyword_has_no_similarity() {
        let doc = PageDocument::new().with_body_text("solar energy");
        let report = analyze_keyword_usage(&doc, "solar").unwrap();
        assert_eq!(report.keywords.len(), 1);
        assert!(report.similarity.is_none());
    }

    #[test]
    fn keywords_processed_in_order() {
        let doc = PageDocument::new()
            .with_title("Solar energy and wind power")
            .with_heading(HeadingLevel::H1, "Solar energy")
            .with_paragraph("Solar energy is cheap. Solar power too.")
            .with_body_from_blocks();

        let report = analyze_keyword_usage(&doc, "wind power, solar energy, solar power").unwrap();
        let names: Vec<&str> = report.keywords.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(names, vec!["wind power", "solar energy", "solar power"]);

        let similarity = report.similarity.expect("three keywords compare");
        assert_eq!(similarity.pairs.len(), 3);
        let competing: Vec<_> = similarity.competing().collect();
        // "wind power"/"solar power" and "solar energy"/"solar power" share one of three words.
        assert_eq!(competing.len(), 2);
    }

    #[test]
    fn blank_input_is_an_error() {
        let doc = PageDocument::new();
        let result = analyze_keyword_usage(&doc, "   ");
        assert!(matches!(result, Err(AnalysisError::NoKeywords)));
    }
}
