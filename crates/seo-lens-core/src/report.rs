//! Report assembly.
//!
//! Turns analysis records into graded [`Finding`]s and a deduplicated list of
//! recommendations. Every function here is a pure function of its input, so
//! the same records always produce the same severities and wording.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::audit::{AuditReport, KeywordAudit};
use crate::content::{ContentReport, LongPassage};
use crate::document::HeadingLevel;
use crate::keywords::{DensityRating, KeywordPlacement, KeywordUsageReport, SimilarityReport};
use crate::readability::{ReadabilityFlag, ReadabilityProfile, flesch_label, lix_label};
use crate::structure::{
    HeadingsReport, ImagesReport, LengthRating, MAX_META_DESCRIPTION_CHARS, MAX_TITLE_CHARS,
    MIN_META_DESCRIPTION_CHARS, MIN_TITLE_CHARS, MetaDescriptionReport, TitleReport,
};

/// Shown in place of a score that could not be computed.
pub const INSUFFICIENT_TEXT: &str = "insufficient text to compute";

/// Matches listed per keyword before the rest are summarized.
const MAX_LISTED_MATCHES: usize = 5;

/// How a finding is graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Neutral information.
    Info,
    /// Meets the recommendation.
    Success,
    /// Worth fixing.
    Warning,
    /// Must fix.
    Error,
}

/// One graded line of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    /// Grade.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
}

/// A titled group of findings with its recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Section {
    /// Section heading.
    pub title: String,
    /// Findings in display order.
    pub findings: Vec<Finding>,
    /// Recommendations, without duplicates, in first-seen order.
    pub recommendations: Vec<String>,
}

impl Section {
    /// Create an empty section.
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            findings: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Append a finding.
    pub fn push<S: Into<String>>(&mut self, severity: Severity, message: S) {
        self.findings.push(Finding {
            severity,
            message: message.into(),
        });
    }

    /// Add a recommendation unless it is already listed.
    pub fn recommend<S: Into<String>>(&mut self, recommendation: S) {
        let recommendation = recommendation.into();
        if !self.recommendations.contains(&recommendation) {
            self.recommendations.push(recommendation);
        }
    }

    /// The most severe grade in the section, ignoring [`Severity::Info`].
    pub fn worst(&self) -> Option<Severity> {
        self.findings
            .iter()
            .map(|f| f.severity)
            .filter(|s| *s != Severity::Info)
            .max()
    }

    /// Number of findings with `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

/// Format a score with one decimal, or [`INSUFFICIENT_TEXT`] when non-finite.
pub fn format_score(score: f64) -> String {
    if score.is_finite() {
        format!("{score:.1}")
    } else {
        INSUFFICIENT_TEXT.to_string()
    }
}

fn labeled_score(score: f64, label: fn(f64) -> &'static str) -> String {
    if score.is_finite() {
        format!("{score:.1} ({})", label(score))
    } else {
        INSUFFICIENT_TEXT.to_string()
    }
}

/// Section for a [`ContentReport`].
pub fn content_section(report: &ContentReport) -> Section {
    let mut section = Section::new("Content");
    let Some(metrics) = &report.metrics else {
        section.push(Severity::Info, "No content to analyze");
        return section;
    };

    section.push(
        Severity::Info,
        format!(
            "{} paragraphs, {} sentences, {} words",
            report.paragraph_count, metrics.sentence_count, metrics.word_count
        ),
    );
    section.push(
        Severity::Info,
        format!(
            "Average words per sentence: {}",
            format_score(metrics.avg_words_per_sentence)
        ),
    );

    match report.profile {
        ReadabilityProfile::Scandinavian => {
            section.push(
                Severity::Info,
                format!("LIX: {}", labeled_score(metrics.lix, lix_label)),
            );
            section.push(
                Severity::Info,
                format!("Long words (over 15 characters): {}", metrics.long_word_count),
            );
        }
        ReadabilityProfile::Default => {
            section.push(
                Severity::Info,
                format!(
                    "Flesch Reading Ease: {}",
                    labeled_score(metrics.flesch_reading_ease, flesch_label)
                ),
            );
            section.push(
                Severity::Info,
                format!(
                    "Flesch-Kincaid Grade: {}",
                    format_score(metrics.flesch_kincaid_grade)
                ),
            );
            section.push(
                Severity::Info,
                format!("Gunning Fog: {}", format_score(metrics.gunning_fog)),
            );
            section.push(
                Severity::Info,
                format!("Coleman-Liau: {}", format_score(metrics.coleman_liau)),
            );
        }
    }

    if report.flags.is_empty() && metrics.avg_words_per_sentence.is_finite() {
        section.push(Severity::Success, "Readability is within recommended limits");
    }
    for flag in &report.flags {
        flag_finding(&mut section, flag);
    }

    passage_findings(
        &mut section,
        "Paragraph",
        &report.long_paragraphs,
        "Split long paragraphs into shorter ones",
    );
    passage_findings(
        &mut section,
        "Sentence",
        &report.long_sentences,
        "Break long sentences into shorter ones",
    );

    if report.suggestion_failures > 0 {
        section.push(
            Severity::Warning,
            format!(
                "{} rewrite suggestions could not be generated",
                report.suggestion_failures
            ),
        );
    }

    section
}

fn flag_finding(section: &mut Section, flag: &ReadabilityFlag) {
    match flag {
        ReadabilityFlag::LongSentences { average, limit } => {
            section.push(
                Severity::Warning,
                format!("Sentences average {average:.1} words (limit {limit:.0})"),
            );
            section.recommend("Break long sentences into shorter ones");
        }
        ReadabilityFlag::ComplexWords { ratio } => {
            section.push(
                Severity::Warning,
                format!("{:.0}% of words have three or more syllables", ratio * 100.0),
            );
            section.recommend("Prefer shorter, simpler words");
        }
        ReadabilityFlag::LowReadingEase { score } => {
            section.push(
                Severity::Warning,
                format!("Flesch Reading Ease {score:.1} is below 60"),
            );
            section.recommend("Simplify the text to make it easier to read");
        }
        ReadabilityFlag::HighLix { score } => {
            section.push(Severity::Warning, format!("LIX {score:.1} is above 50"));
            section.recommend("Simplify the text to make it easier to read");
        }
    }
}

fn passage_findings(section: &mut Section, kind: &str, passages: &[LongPassage], advice: &str) {
    for passage in passages {
        section.push(
            Severity::Warning,
            format!(
                "{kind} {} has {} words: \"{}\"",
                passage.position, passage.word_count, passage.preview
            ),
        );
        if let Some(suggestion) = &passage.suggestion {
            section.push(Severity::Info, format!("Suggested rewrite: {suggestion}"));
        }
        section.recommend(advice);
    }
}

/// Section for a [`KeywordUsageReport`].
pub fn keyword_section(report: &KeywordUsageReport) -> Section {
    let mut section = Section::new("Keywords");
    for placement in &report.keywords {
        placement_findings(&mut section, placement);
    }
    if let Some(similarity) = &report.similarity {
        similarity_findings(&mut section, similarity);
    }
    section
}

fn placement_findings(section: &mut Section, p: &KeywordPlacement) {
    let kw = &p.keyword;
    let density = format!("\"{kw}\": density {:.2}% ({} occurrences)", p.density, p.occurrences);
    match p.density_rating() {
        DensityRating::Optimal => section.push(Severity::Success, density),
        DensityRating::TooLow => {
            section.push(Severity::Warning, format!("{density}, too low"));
            section.recommend(format!("Use \"{kw}\" more often in the body text"));
        }
        DensityRating::TooHigh => {
            section.push(Severity::Warning, format!("{density}, too high"));
            section.recommend(format!(
                "Use \"{kw}\" less often to avoid keyword stuffing"
            ));
        }
    }

    let zones = [
        (p.in_title, "title", "Include your keywords in the page title"),
        (
            p.in_meta_description,
            "meta description",
            "Include your keywords in the meta description",
        ),
        (
            p.in_first_paragraph,
            "first paragraph",
            "Mention your keywords in the first paragraph",
        ),
        (p.in_url, "URL", "Use your keywords in the URL path"),
    ];
    for (present, zone, advice) in zones {
        if present {
            section.push(Severity::Success, format!("\"{kw}\" appears in the {zone}"));
        } else {
            section.push(Severity::Warning, format!("\"{kw}\" is missing from the {zone}"));
            section.recommend(advice);
        }
    }

    let h = &p.in_headings;
    if h.total() == 0 {
        section.push(Severity::Warning, format!("\"{kw}\" is missing from H1-H3 headings"));
        section.recommend("Use your keywords in H1-H3 headings");
    } else {
        section.push(
            Severity::Success,
            format!(
                "\"{kw}\" appears in headings (H1: {}, H2: {}, H3: {})",
                h.h1, h.h2, h.h3
            ),
        );
    }

    if !p.matches.is_empty() {
        let listed: Vec<String> = p
            .matches
            .iter()
            .take(MAX_LISTED_MATCHES)
            .map(|m| format!("\"{m}\""))
            .collect();
        let rest = p.matches.len().saturating_sub(MAX_LISTED_MATCHES);
        let suffix = if rest > 0 {
            format!(" and {rest} more")
        } else {
            String::new()
        };
        section.push(
            Severity::Info,
            format!("Matches for \"{kw}\": {}{suffix}", listed.join(", ")),
        );
    }
}

fn similarity_findings(section: &mut Section, report: &SimilarityReport) {
    if report.is_distinct() {
        section.push(Severity::Success, "Keywords are sufficiently distinct");
        return;
    }
    for pair in report.competing() {
        section.push(
            Severity::Warning,
            format!(
                "\"{}\" and \"{}\" overlap {:.0}% and may compete",
                pair.keyword_a,
                pair.keyword_b,
                pair.ratio * 100.0
            ),
        );
    }
    section.recommend("Differentiate competing keywords or target them on separate pages");
}

/// Section shown when no keywords were supplied.
pub fn no_keywords_section() -> Section {
    let mut section = Section::new("Keywords");
    section.push(Severity::Info, "No keywords provided");
    section
}

fn length_findings(
    section: &mut Section,
    element: &str,
    length: usize,
    rating: LengthRating,
    (min, max): (usize, usize),
) {
    let range = format!("{min}-{max} characters");
    match rating {
        LengthRating::Missing => {
            section.push(Severity::Error, format!("No {element} found"));
            section.recommend(format!("Add a {element} of {range}"));
        }
        LengthRating::TooShort => {
            section.push(
                Severity::Warning,
                format!("The {element} is too short ({length} characters)"),
            );
            section.recommend(format!("Lengthen the {element} to {range}"));
        }
        LengthRating::TooLong => {
            section.push(
                Severity::Warning,
                format!("The {element} is too long ({length} characters)"),
            );
            section.recommend(format!("Shorten the {element} to {range}"));
        }
        LengthRating::Good => {
            section.push(
                Severity::Success,
                format!("The {element} length is good ({length} characters)"),
            );
        }
    }
}

/// Section for a [`TitleReport`].
pub fn title_section(report: &TitleReport) -> Section {
    let mut section = Section::new("Title");
    if let Some(title) = &report.title {
        section.push(Severity::Info, format!("\"{title}\""));
    }
    length_findings(
        &mut section,
        "title",
        report.length,
        report.rating,
        (MIN_TITLE_CHARS, MAX_TITLE_CHARS),
    );
    section
}

/// Section for a [`MetaDescriptionReport`].
pub fn meta_description_section(report: &MetaDescriptionReport) -> Section {
    let mut section = Section::new("Meta description");
    if let Some(description) = &report.description {
        section.push(Severity::Info, format!("\"{description}\""));
    }
    length_findings(
        &mut section,
        "meta description",
        report.length,
        report.rating,
        (MIN_META_DESCRIPTION_CHARS, MAX_META_DESCRIPTION_CHARS),
    );
    section
}

/// Section for a [`HeadingsReport`].
pub fn headings_section(report: &HeadingsReport) -> Section {
    let mut section = Section::new("Headings");
    let counts: Vec<String> = report
        .counts
        .iter()
        .map(|c| format!("{}: {}", c.level, c.count))
        .collect();
    section.push(Severity::Info, counts.join(", "));

    match report.count(HeadingLevel::H1) {
        0 => {
            section.push(Severity::Error, "No H1 heading found");
            section.recommend("Add one H1 heading that describes the page");
        }
        1 => section.push(Severity::Success, "Exactly one H1 heading"),
        n => {
            section.push(Severity::Warning, format!("{n} H1 headings found"));
            section.recommend("Use a single H1 heading per page");
        }
    }

    for skip in &report.skipped_levels {
        section.push(
            Severity::Warning,
            format!("Heading level skipped: {} followed by {}", skip.from, skip.to),
        );
        section.recommend("Do not skip heading levels");
    }

    if report.empty_headings > 0 {
        section.push(
            Severity::Warning,
            format!("{} empty headings", report.empty_headings),
        );
        section.recommend("Give every heading descriptive text");
    }

    section
}

/// Section for an [`ImagesReport`].
pub fn images_section(report: &ImagesReport) -> Section {
    let mut section = Section::new("Images");
    if report.total == 0 {
        section.push(Severity::Info, "No images found");
        return section;
    }

    if report.missing_alt.is_empty() {
        section.push(
            Severity::Success,
            format!("All {} images have alt text", report.total),
        );
    } else {
        section.push(
            Severity::Warning,
            format!(
                "{} of {} images have no alt text",
                report.missing_alt.len(),
                report.total
            ),
        );
        for src in &report.missing_alt {
            let src = if src.is_empty() { "(no src)" } else { src };
            section.push(Severity::Info, format!("Missing alt: {src}"));
        }
        section.recommend("Add descriptive alt text to every informative image");
    }

    if report.decorative > 0 {
        section.push(
            Severity::Info,
            format!("{} decorative images (alt=\"\")", report.decorative),
        );
    }

    section
}

/// Sections for every check in an [`AuditReport`], in report order.
pub fn audit_sections(report: &AuditReport) -> Vec<Section> {
    let mut sections = Vec::new();
    if let Some(title) = &report.title {
        sections.push(title_section(title));
    }
    if let Some(meta) = &report.meta_description {
        sections.push(meta_description_section(meta));
    }
    if let Some(headings) = &report.headings {
        sections.push(headings_section(headings));
    }
    if let Some(images) = &report.images {
        sections.push(images_section(images));
    }
    if let Some(content) = &report.content {
        sections.push(content_section(content));
    }
    match &report.keywords {
        Some(KeywordAudit::Analyzed(keywords)) => sections.push(keyword_section(keywords)),
        Some(KeywordAudit::NoKeywords) => sections.push(no_keywords_section()),
        None => {}
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::NoopAdvisor;
    use crate::content::{ContentOptions, analyze_content};
    use crate::document::PageDocument;
    use crate::keywords::analyze_keyword_usage;
    use crate::readability::compute_metrics;
    use crate::structure::{analyze_headings, analyze_images, analyze_title};

    fn all_messages(section: &Section) -> String {
        section
            .findings
            .iter()
            .map(|f| f.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn format_score_suppresses_non_finite() {
        assert_eq!(format_score(12.345), "12.3");
        assert_eq!(format_score(f64::NAN), INSUFFICIENT_TEXT);
        assert_eq!(format_score(f64::INFINITY), INSUFFICIENT_TEXT);
        assert_eq!(format_score(f64::NEG_INFINITY), INSUFFICIENT_TEXT);
    }

    #[test]
    fn recommendations_are_deduplicated() {
        let mut section = Section::new("Test");
        section.recommend("Do the thing");
        section.recommend("Do another thing");
        section.recommend("Do the thing");
        assert_eq!(section.recommendations, vec!["Do the thing", "Do another thing"]);
    }

    #[test]
    fn worst_ignores_info() {
        let mut section = Section::new("Test");
        assert_eq!(section.worst(), None);
        section.push(Severity::Info, "fyi");
        assert_eq!(section.worst(), None);
        section.push(Severity::Success, "ok");
        section.push(Severity::Warning, "hmm");
        assert_eq!(section.worst(), Some(Severity::Warning));
        section.push(Severity::Error, "bad");
        assert_eq!(section.worst(), Some(Severity::Error));
        assert_eq!(section.count(Severity::Warning), 1);
    }

    #[test]
    fn empty_content_says_so() {
        let doc = PageDocument::new();
        let report = analyze_content(&doc, &ContentOptions::default(), &NoopAdvisor);
        let section = content_section(&report);
        assert_eq!(section.findings.len(), 1);
        assert_eq!(section.findings[0].message, "No content to analyze");
        assert!(section.recommendations.is_empty());
    }

    #[test]
    fn degenerate_metrics_never_print_nan() {
        // Punctuation only: one word, zero sentences.
        let doc = PageDocument::new().with_paragraph("...");
        let report = analyze_content(&doc, &ContentOptions::default(), &NoopAdvisor);
        assert!(!compute_metrics("...").flesch_reading_ease.is_finite());
        let text = all_messages(&content_section(&report));
        assert!(!text.contains("NaN"));
        assert!(!text.contains("inf"));
        assert!(text.contains(INSUFFICIENT_TEXT));
    }

    #[test]
    fn content_section_is_deterministic() {
        let doc = PageDocument::new().with_paragraph(
            "Comprehensive organizational restructuring necessitates considerable deliberation. \
             Unquestionably, interdisciplinary collaboration facilitates innovation.",
        );
        let report = analyze_content(&doc, &ContentOptions::default(), &NoopAdvisor);
        let first = content_section(&report);
        let second = content_section(&report);
        assert_eq!(first, second);
        assert!(first.count(Severity::Warning) > 0);
        assert!(
            first
                .recommendations
                .contains(&"Prefer shorter, simpler words".to_string())
        );
    }

    #[test]
    fn keyword_recommendations_are_shared() {
        let doc = PageDocument::new().with_body_text("wind power and solar energy");
        let report = analyze_keyword_usage(&doc, "wind power, solar energy").unwrap();
        let section = keyword_section(&report);
        let title_advice = section
            .recommendations
            .iter()
            .filter(|r| r.as_str() == "Include your keywords in the page title")
            .count();
        assert_eq!(title_advice, 1);
        assert!(all_messages(&section).contains("Keywords are sufficiently distinct"));
    }

    #[test]
    fn competing_keywords_are_warned() {
        let doc = PageDocument::new().with_body_text("solar energy and solar power");
        let report = analyze_keyword_usage(&doc, "solar energy, solar power").unwrap();
        let section = keyword_section(&report);
        assert!(all_messages(&section).contains("overlap 33% and may compete"));
    }

    #[test]
    fn missing_title_is_an_error() {
        let section = title_section(&analyze_title(&PageDocument::new()));
        assert_eq!(section.worst(), Some(Severity::Error));
        assert_eq!(section.recommendations, vec!["Add a title of 30-60 characters"]);
    }

    #[test]
    fn headings_without_h1() {
        let doc = PageDocument::new()
            .with_heading(HeadingLevel::H2, "Intro")
            .with_heading(HeadingLevel::H4, "Detail");
        let section = headings_section(&analyze_headings(&doc));
        assert_eq!(section.worst(), Some(Severity::Error));
        assert!(all_messages(&section).contains("Heading level skipped: H2 followed by H4"));
    }

    #[test]
    fn no_images_is_info() {
        let section = images_section(&analyze_images(&PageDocument::new()));
        assert_eq!(section.worst(), None);
        assert_eq!(section.findings[0].message, "No images found");
    }
}
