//! Keyword placement across the structural zones of a page.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::document::{Document, HeadingLevel};
use crate::text;

use super::occurrences::{count_occurrences, find_occurrences};

/// Densities below this percentage are too low.
pub const MIN_OPTIMAL_DENSITY: f64 = 0.5;

/// Densities above this percentage risk keyword stuffing.
pub const MAX_OPTIMAL_DENSITY: f64 = 2.5;

/// Occurrence counts per heading level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HeadingCounts {
    /// Occurrences across all `<h1>` elements.
    pub h1: usize,
    /// Occurrences across all `<h2>` elements.
    pub h2: usize,
    /// Occurrences across all `<h3>` elements.
    pub h3: usize,
}

impl HeadingCounts {
    /// Occurrences across all three levels.
    pub const fn total(&self) -> usize {
        self.h1 + self.h2 + self.h3
    }
}

/// Where and how often a keyword appears on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordPlacement {
    /// The keyword as supplied.
    pub keyword: String,
    /// Keyword density in percent of body words.
    pub density: f64,
    /// Occurrences in the body text.
    pub occurrences: usize,
    /// Whether the title contains the keyword.
    pub in_title: bool,
    /// Whether the first paragraph contains the keyword.
    pub in_first_paragraph: bool,
    /// Whether the meta description contains the keyword.
    pub in_meta_description: bool,
    /// Whether the URL path contains the hyphenated keyword.
    pub in_url: bool,
    /// Occurrences per heading level.
    pub in_headings: HeadingCounts,
    /// Literal matches in the body, in order.
    pub matches: Vec<String>,
}

impl KeywordPlacement {
    /// Classify [`KeywordPlacement::density`].
    pub fn density_rating(&self) -> DensityRating {
        DensityRating::from_density(self.density)
    }
}

/// How a keyword density compares to the optimal band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DensityRating {
    /// Below 0.5%.
    TooLow,
    /// Between 0.5% and 2.5% inclusive.
    Optimal,
    /// Above 2.5%.
    TooHigh,
}

impl DensityRating {
    /// Classify a density percentage.
    pub fn from_density(density: f64) -> Self {
        if density < MIN_OPTIMAL_DENSITY {
            Self::TooLow
        } else if density > MAX_OPTIMAL_DENSITY {
            Self::TooHigh
        } else {
            Self::Optimal
        }
    }
}

/// Analyze where `keyword` appears in `document`.
///
/// Density is `occurrences * keyword_words / body_words * 100`, where body
/// words are counted on the normalized body text. A body without words has
/// density 0.
#[tracing::instrument(skip(document))]
pub fn analyze_placement<D: Document + ?Sized>(document: &D, keyword: &str) -> KeywordPlacement {
    let body = document.body_text();
    let body_words = text::count_words(&text::normalize(body));
    let keyword_words = text::count_words(keyword);

    let matches = find_occurrences(body, keyword);
    let occurrences = matches.len();
    let density = if body_words == 0 {
        0.0
    } else {
        (occurrences * keyword_words) as f64 / body_words as f64 * 100.0
    };

    let in_title = document
        .title()
        .is_some_and(|t| count_occurrences(t, keyword) > 0);
    let in_meta_description = document
        .meta_description()
        .is_some_and(|d| count_occurrences(d, keyword) > 0);
    let in_first_paragraph = document
        .paragraphs()
        .first()
        .is_some_and(|p| count_occurrences(p, keyword) > 0);
    let in_url = url_contains(document.url_path(), keyword);

    let in_headings = HeadingCounts {
        h1: heading_occurrences(document, HeadingLevel::H1, keyword),
        h2: heading_occurrences(document, HeadingLevel::H2, keyword),
        h3: heading_occurrences(document, HeadingLevel::H3, keyword),
    };

    tracing::debug!(occurrences, body_words, density, "keyword placement analyzed");

    KeywordPlacement {
        keyword: keyword.to_string(),
        density,
        occurrences,
        in_title,
        in_first_paragraph,
        in_meta_description,
        in_url,
        in_headings,
        matches,
    }
}

fn heading_occurrences<D: Document + ?Sized>(
    document: &D,
    level: HeadingLevel,
    keyword: &str,
) -> usize {
    document
        .headings(level)
        .into_iter()
        .map(|h| count_occurrences(h, keyword))
        .sum()
}

/// Substring test of the hyphenated keyword against the lowercased path.
///
/// Only whitespace becomes `-`; hyphens already in the keyword are kept, so
/// `e-commerce` matches `/e-commerce-guide`.
fn url_contains(path: &str, keyword: &str) -> bool {
    let slug = keyword
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    !slug.is_empty() && path.to_lowercase().contains(&slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageDocument;

    #[test]
    fn url_slug_keeps_hyphenated_keywords() {
        assert!(url_contains("/blog/e-commerce-guide", "e-commerce"));
        assert!(url_contains("/blog/E-Commerce-Guide", "E-commerce guide"));
        assert!(url_contains("/solar-energy", "  solar   energy "));
        assert!(!url_contains("/blog/ecommerce", "e-commerce"));
        assert!(!url_contains("/anything", "   "));
    }

    fn filler(words: usize) -> String {
        vec!["lorem"; words].join(" ")
    }

    #[test]
    fn density_one_percent_is_optimal() {
        let body = format!("{} energy", filler(99));
        let doc = PageDocument::new().with_body_text(body);
        let p = analyze_placement(&doc, "energy");
        assert_eq!(p.occurrences, 1);
        assert!((p.density - 1.0).abs() < 1e-9);
        assert_eq!(p.density_rating(), DensityRating::Optimal);
    }

    #[test]
    fn density_counts_keyword_words() {
        // 2 occurrences * 2 words / 100 words = 4%
        let body = format!("solar power {} solar power", filler(96));
        let doc = PageDocument::new().with_body_text(body);
        let p = analyze_placement(&doc, "solar power");
        assert_eq!(p.occurrences, 2);
        assert!((p.density - 4.0).abs() < 1e-9);
        assert_eq!(p.density_rating(), DensityRating::TooHigh);
    }

    #[test]
    fn density_rating_bounds_are_inclusive() {
        assert_eq!(DensityRating::from_density(0.49), DensityRating::TooLow);
        assert_eq!(DensityRating::from_density(0.5), DensityRating::Optimal);
        assert_eq!(DensityRating::from_density(2.5), DensityRating::Optimal);
        assert_eq!(DensityRating::from_density(2.51), DensityRating::TooHigh);
    }

    #[test]
    fn density_is_not_clamped() {
        let doc = PageDocument::new().with_body_text("spam spam spam");
        let p = analyze_placement(&doc, "spam");
        assert!((p.density - 100.0).abs() < 1e-9);

        // Overlapping windows: 2 matches * 2 words / 3 body words.
        let p = analyze_placement(&doc, "spam spam");
        assert_eq!(p.occurrences, 2);
        assert!(p.density > 100.0);
    }

    #[test]
    fn empty_body_has_zero_density() {
        let doc = PageDocument::new();
        let p = analyze_placement(&doc, "energy");
        assert_eq!(p.occurrences, 0);
        assert_eq!(p.density, 0.0);
        assert_eq!(p.density_rating(), DensityRating::TooLow);
    }

    #[test]
    fn zone_presence() {
        let doc = PageDocument::new()
            .with_title("Solar Energy Guide")
            .with_meta_description("Everything about solar energy.")
            .with_url_path("/guides/Solar-Energy-Basics")
            .with_paragraph("Solar energy is growing fast.")
            .with_paragraph("Nothing here.")
            .with_body_from_blocks();
        let p = analyze_placement(&doc, "solar energy");
        assert!(p.in_title);
        assert!(p.in_meta_description);
        assert!(p.in_first_paragraph);
        assert!(p.in_url);
    }

    #[test]
    fn missing_zones_are_false() {
        let doc = PageDocument::new().with_body_text("solar energy everywhere");
        let p = analyze_placement(&doc, "solar energy");
        assert!(!p.in_title);
        assert!(!p.in_meta_description);
        assert!(!p.in_first_paragraph);
        assert!(!p.in_url);
        assert_eq!(p.in_headings, HeadingCounts::default());
    }

    #[test]
    fn first_paragraph_only() {
        let doc = PageDocument::new()
            .with_paragraph("Intro without it.")
            .with_paragraph("Later mention of energy.");
        let p = analyze_placement(&doc, "energy");
        assert!(!p.in_first_paragraph);
    }

    #[test]
    fn heading_counts_sum_to_concatenated_headings() {
        let doc = PageDocument::new()
            .with_heading(HeadingLevel::H1, "Energy for everyone")
            .with_heading(HeadingLevel::H2, "Why energy matters")
            .with_heading(HeadingLevel::H2, "Energy, energy, energy")
            .with_heading(HeadingLevel::H3, "Saving energy")
            .with_heading(HeadingLevel::H4, "energy in footnotes");
        let p = analyze_placement(&doc, "energy");
        assert_eq!(p.in_headings.h1, 1);
        assert_eq!(p.in_headings.h2, 4);
        assert_eq!(p.in_headings.h3, 1);

        let concatenated = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3]
            .into_iter()
            .flat_map(|level| doc.headings(level))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(
            p.in_headings.total(),
            count_occurrences(&concatenated, "energy")
        );
    }

    #[test]
    fn matches_preserve_casing() {
        let doc = PageDocument::new().with_body_text("Energy and ENERGY and energy");
        let p = analyze_placement(&doc, "energy");
        assert_eq!(p.matches, vec!["Energy", "ENERGY", "energy"]);
    }
}
