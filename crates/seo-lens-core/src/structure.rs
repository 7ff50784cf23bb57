//! Structural checks: title, meta description, headings and images.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::document::{Document, Heading, HeadingLevel};

/// Shortest title that still reads well in search results.
pub const MIN_TITLE_CHARS: usize = 30;

/// Longest title before search engines truncate it.
pub const MAX_TITLE_CHARS: usize = 60;

/// Shortest useful meta description.
pub const MIN_META_DESCRIPTION_CHARS: usize = 120;

/// Longest meta description before truncation.
pub const MAX_META_DESCRIPTION_CHARS: usize = 160;

/// How a text length compares to its recommended range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LengthRating {
    /// The element is absent or blank.
    Missing,
    /// Shorter than the recommended minimum.
    TooShort,
    /// Longer than the recommended maximum.
    TooLong,
    /// Within range.
    Good,
}

impl LengthRating {
    fn classify(text: Option<&str>, min: usize, max: usize) -> (usize, Self) {
        let Some(text) = text else {
            return (0, Self::Missing);
        };
        let length = text.trim().chars().count();
        let rating = if length < min {
            Self::TooShort
        } else if length > max {
            Self::TooLong
        } else {
            Self::Good
        };
        (length, rating)
    }
}

/// Result of the title check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TitleReport {
    /// The title text, if any.
    pub title: Option<String>,
    /// Length in characters.
    pub length: usize,
    /// Length classification.
    pub rating: LengthRating,
}

/// Result of the meta description check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MetaDescriptionReport {
    /// The description text, if any.
    pub description: Option<String>,
    /// Length in characters.
    pub length: usize,
    /// Length classification.
    pub rating: LengthRating,
}

/// Check the page title length.
#[tracing::instrument(skip_all)]
pub fn analyze_title<D: Document + ?Sized>(document: &D) -> TitleReport {
    let title = document.title();
    let (length, rating) = LengthRating::classify(title, MIN_TITLE_CHARS, MAX_TITLE_CHARS);
    TitleReport {
        title: title.map(|t| t.trim().to_string()),
        length,
        rating,
    }
}

/// Check the meta description length.
#[tracing::instrument(skip_all)]
pub fn analyze_meta_description<D: Document + ?Sized>(document: &D) -> MetaDescriptionReport {
    let description = document.meta_description();
    let (length, rating) = LengthRating::classify(
        description,
        MIN_META_DESCRIPTION_CHARS,
        MAX_META_DESCRIPTION_CHARS,
    );
    MetaDescriptionReport {
        description: description.map(|d| d.trim().to_string()),
        length,
        rating,
    }
}

/// Number of headings at one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LevelCount {
    /// Heading level.
    pub level: HeadingLevel,
    /// Headings at that level.
    pub count: usize,
}

/// A jump of more than one level going down the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SkippedLevel {
    /// Level of the preceding heading.
    pub from: HeadingLevel,
    /// Level of the heading that skipped.
    pub to: HeadingLevel,
}

/// Result of the heading structure check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HeadingsReport {
    /// Counts for all six levels, outermost first.
    pub counts: Vec<LevelCount>,
    /// Headings in document order.
    pub outline: Vec<Heading>,
    /// Downward jumps such as `H2` followed by `H4`.
    pub skipped_levels: Vec<SkippedLevel>,
    /// Headings with no text.
    pub empty_headings: usize,
}

impl HeadingsReport {
    /// Headings at `level`.
    pub fn count(&self, level: HeadingLevel) -> usize {
        self.counts
            .iter()
            .find(|c| c.level == level)
            .map_or(0, |c| c.count)
    }

    /// Total number of headings.
    pub fn total(&self) -> usize {
        self.outline.len()
    }
}

/// Check heading counts and outline order.
#[tracing::instrument(skip_all)]
pub fn analyze_headings<D: Document + ?Sized>(document: &D) -> HeadingsReport {
    let outline = document.all_headings().to_vec();

    let counts = HeadingLevel::ALL
        .iter()
        .map(|&level| LevelCount {
            level,
            count: outline.iter().filter(|h| h.level == level).count(),
        })
        .collect();

    let skipped_levels = outline
        .windows(2)
        .filter(|pair| pair[1].level.rank() > pair[0].level.rank() + 1)
        .map(|pair| SkippedLevel {
            from: pair[0].level,
            to: pair[1].level,
        })
        .collect();

    let empty_headings = outline.iter().filter(|h| h.text.trim().is_empty()).count();

    HeadingsReport {
        counts,
        outline,
        skipped_levels,
        empty_headings,
    }
}

/// Result of the image alt text check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImagesReport {
    /// Number of `<img>` elements.
    pub total: usize,
    /// Images marked decorative with `alt=""`.
    pub decorative: usize,
    /// `src` of every image without an accessible name.
    pub missing_alt: Vec<String>,
}

/// Check that images carry an accessible name.
#[tracing::instrument(skip_all)]
pub fn analyze_images<D: Document + ?Sized>(document: &D) -> ImagesReport {
    let images = document.images();
    ImagesReport {
        total: images.len(),
        decorative: images.iter().filter(|i| i.is_decorative()).count(),
        missing_alt: images
            .iter()
            .filter(|i| i.accessible_name().is_none())
            .map(|i| i.src.clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Image, PageDocument};

    #[test]
    fn title_ratings() {
        let missing = analyze_title(&PageDocument::new());
        assert_eq!(missing.rating, LengthRating::Missing);
        assert_eq!(missing.length, 0);

        let blank = analyze_title(&PageDocument::new().with_title("   "));
        assert_eq!(blank.rating, LengthRating::Missing);

        let short = analyze_title(&PageDocument::new().with_title("Home"));
        assert_eq!(short.rating, LengthRating::TooShort);

        let good = analyze_title(
            &PageDocument::new().with_title("Solar Energy Basics: A Practical Guide"),
        );
        assert_eq!(good.rating, LengthRating::Good);

        let long = analyze_title(&PageDocument::new().with_title("x".repeat(61)));
        assert_eq!(long.rating, LengthRating::TooLong);
        assert_eq!(long.length, 61);
    }

    #[test]
    fn title_bounds_are_inclusive() {
        let at_min = analyze_title(&PageDocument::new().with_title("a".repeat(30)));
        let at_max = analyze_title(&PageDocument::new().with_title("a".repeat(60)));
        assert_eq!(at_min.rating, LengthRating::Good);
        assert_eq!(at_max.rating, LengthRating::Good);
    }

    #[test]
    fn meta_description_ratings() {
        let missing = analyze_meta_description(&PageDocument::new());
        assert_eq!(missing.rating, LengthRating::Missing);

        let short = analyze_meta_description(
            &PageDocument::new().with_meta_description("A short description."),
        );
        assert_eq!(short.rating, LengthRating::TooShort);

        let good = analyze_meta_description(
            &PageDocument::new().with_meta_description("d".repeat(140)),
        );
        assert_eq!(good.rating, LengthRating::Good);

        let long = analyze_meta_description(
            &PageDocument::new().with_meta_description("d".repeat(161)),
        );
        assert_eq!(long.rating, LengthRating::TooLong);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let report = analyze_title(&PageDocument::new().with_title("å".repeat(30)));
        assert_eq!(report.length, 30);
        assert_eq!(report.rating, LengthRating::Good);
    }

    #[test]
    fn headings_counts_and_skips() {
        let doc = PageDocument::new()
            .with_heading(HeadingLevel::H1, "Title")
            .with_heading(HeadingLevel::H2, "Section")
            .with_heading(HeadingLevel::H4, "Too deep")
            .with_heading(HeadingLevel::H2, "Back up")
            .with_heading(HeadingLevel::H3, " ");
        let report = analyze_headings(&doc);

        assert_eq!(report.total(), 5);
        assert_eq!(report.count(HeadingLevel::H1), 1);
        assert_eq!(report.count(HeadingLevel::H2), 2);
        assert_eq!(report.count(HeadingLevel::H6), 0);
        assert_eq!(report.counts.len(), 6);
        assert_eq!(
            report.skipped_levels,
            vec![SkippedLevel {
                from: HeadingLevel::H2,
                to: HeadingLevel::H4,
            }]
        );
        assert_eq!(report.empty_headings, 1);
    }

    #[test]
    fn no_headings_is_a_zero_state() {
        let report = analyze_headings(&PageDocument::new());
        assert_eq!(report.total(), 0);
        assert_eq!(report.count(HeadingLevel::H1), 0);
        assert!(report.skipped_levels.is_empty());
    }

    #[test]
    fn images_without_accessible_names() {
        let doc = PageDocument::new()
            .with_image(Image {
                src: "a.png".into(),
                alt: Some("A chart".into()),
                ..Image::default()
            })
            .with_image(Image {
                src: "spacer.gif".into(),
                alt: Some(String::new()),
                ..Image::default()
            })
            .with_image(Image {
                src: "icon.svg".into(),
                aria_label: Some("Settings".into()),
                ..Image::default()
            })
            .with_image(Image {
                src: "b.png".into(),
                ..Image::default()
            });
        let report = analyze_images(&doc);
        assert_eq!(report.total, 4);
        assert_eq!(report.decorative, 1);
        assert_eq!(report.missing_alt, vec!["b.png"]);
    }
}
