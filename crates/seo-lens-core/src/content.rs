//! Content readability analysis.
//!
//! Scores the paragraph text of a page, flags overlong paragraphs and
//! sentences, and asks an [`Advisor`] for rewrites of the flagged passages.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::advisor::{Advisor, SuggestionConstraints, SuggestionKind};
use crate::document::Document;
use crate::readability::{
    ReadabilityFlag, ReadabilityMetrics, ReadabilityProfile, compute_metrics, readability_flags,
};
use crate::text;

/// Default word limit for a paragraph.
pub const DEFAULT_LONG_PARAGRAPH_WORDS: usize = 150;

/// Default word limit for a sentence.
pub const DEFAULT_LONG_SENTENCE_WORDS: usize = 25;

const PREVIEW_CHARS: usize = 80;

/// Tunable limits for content analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContentOptions {
    /// Paragraphs with more words than this are flagged.
    pub long_paragraph_words: usize,
    /// Sentences with more words than this are flagged.
    pub long_sentence_words: usize,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            long_paragraph_words: DEFAULT_LONG_PARAGRAPH_WORDS,
            long_sentence_words: DEFAULT_LONG_SENTENCE_WORDS,
        }
    }
}

/// A paragraph or sentence over its word limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LongPassage {
    /// 1-based position among the page's paragraphs or sentences.
    pub position: usize,
    /// Words in the passage.
    pub word_count: usize,
    /// The start of the passage.
    pub preview: String,
    /// Rewrite offered by the advisor, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Result of content analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContentReport {
    /// Number of non-empty paragraphs analyzed.
    pub paragraph_count: usize,
    /// Language hint the rules were chosen by.
    pub language: String,
    /// Readability rules applied.
    pub profile: ReadabilityProfile,
    /// Scores, or `None` when the page has no paragraph text.
    pub metrics: Option<ReadabilityMetrics>,
    /// Readability problems found.
    pub flags: Vec<ReadabilityFlag>,
    /// Paragraphs over the paragraph limit.
    pub long_paragraphs: Vec<LongPassage>,
    /// Sentences over the sentence limit.
    pub long_sentences: Vec<LongPassage>,
    /// Advisor calls that failed.
    pub suggestion_failures: usize,
}

impl ContentReport {
    /// Whether there was any content to score.
    pub const fn has_content(&self) -> bool {
        self.metrics.is_some()
    }
}

/// Analyze the paragraph content of `document`.
///
/// Advisor failures are logged and counted; they never change the metrics,
/// flags or passage lists.
#[tracing::instrument(skip_all, fields(paragraphs = document.paragraphs().len()))]
pub fn analyze_content<D: Document + ?Sized>(
    document: &D,
    options: &ContentOptions,
    advisor: &dyn Advisor,
) -> ContentReport {
    let language = document.language_hint();
    let profile = ReadabilityProfile::for_language(&language);

    let paragraphs: Vec<&str> = document
        .paragraphs()
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        tracing::debug!("no paragraph content");
        return ContentReport {
            paragraph_count: 0,
            language,
            profile,
            metrics: None,
            flags: Vec::new(),
            long_paragraphs: Vec::new(),
            long_sentences: Vec::new(),
            suggestion_failures: 0,
        };
    }

    let content = paragraphs.join(" ");
    let metrics = compute_metrics(&content);
    let flags = readability_flags(&metrics, profile);

    let mut suggester = Suggester {
        advisor,
        language: &language,
        failures: 0,
    };

    let long_paragraphs = paragraphs
        .iter()
        .enumerate()
        .filter_map(|(i, paragraph)| {
            let word_count = text::count_words(paragraph);
            (word_count > options.long_paragraph_words).then(|| LongPassage {
                position: i + 1,
                word_count,
                preview: text::preview(paragraph, PREVIEW_CHARS),
                suggestion: suggester.suggest(
                    paragraph,
                    SuggestionKind::Paragraph,
                    options.long_paragraph_words,
                ),
            })
        })
        .collect();

    let long_sentences = text::split_sentences(&content)
        .into_iter()
        .enumerate()
        .filter_map(|(i, sentence)| {
            let word_count = text::count_words(sentence);
            (word_count > options.long_sentence_words).then(|| LongPassage {
                position: i + 1,
                word_count,
                preview: text::preview(sentence, PREVIEW_CHARS),
                suggestion: suggester.suggest(
                    sentence,
                    SuggestionKind::Sentence,
                    options.long_sentence_words,
                ),
            })
        })
        .collect();

    let suggestion_failures = suggester.failures;
    tracing::debug!(
        words = metrics.word_count,
        flags = flags.len(),
        suggestion_failures,
        "content analyzed"
    );

    ContentReport {
        paragraph_count: paragraphs.len(),
        language,
        profile,
        metrics: Some(metrics),
        flags,
        long_paragraphs,
        long_sentences,
        suggestion_failures,
    }
}

struct Suggester<'a> {
    advisor: &'a dyn Advisor,
    language: &'a str,
    failures: usize,
}

impl Suggester<'_> {
    fn suggest(&mut self, text: &str, kind: SuggestionKind, max_words: usize) -> Option<String> {
        let constraints = SuggestionConstraints {
            max_words,
            language: self.language.to_string(),
        };
        match self.advisor.suggest_improvement(text, kind, &constraints) {
            Ok(suggestion) => suggestion.filter(|s| !s.trim().is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, ?kind, "suggestion failed");
                self.failures += 1;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::NoopAdvisor;
    use crate::document::PageDocument;
    use crate::error::AdvisorError;

    struct FailingAdvisor;

    impl Advisor for FailingAdvisor {
        fn suggest_improvement(
            &self,
            _text: &str,
            _kind: SuggestionKind,
            _constraints: &SuggestionConstraints,
        ) -> Result<Option<String>, AdvisorError> {
            Err(AdvisorError::Unavailable("offline".into()))
        }
    }

    struct ShoutingAdvisor;

    impl Advisor for ShoutingAdvisor {
        fn suggest_improvement(
            &self,
            text: &str,
            _kind: SuggestionKind,
            constraints: &SuggestionConstraints,
        ) -> Result<Option<String>, AdvisorError> {
            assert_eq!(constraints.language, "en");
            Ok(Some(text.to_uppercase()))
        }
    }

    /// Rewrites paragraphs but returns unusable sentence rewrites.
    struct GarbledSentenceAdvisor;

    impl Advisor for GarbledSentenceAdvisor {
        fn suggest_improvement(
            &self,
            _text: &str,
            kind: SuggestionKind,
            _constraints: &SuggestionConstraints,
        ) -> Result<Option<String>, AdvisorError> {
            match kind {
                SuggestionKind::Paragraph => Ok(Some("Shorter paragraph.".into())),
                SuggestionKind::Sentence => {
                    Err(AdvisorError::InvalidResponse("empty body".into()))
                }
            }
        }
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn no_paragraphs_reports_no_content() {
        let doc = PageDocument::new().with_body_text("only body text, no paragraphs");
        let report = analyze_content(&doc, &ContentOptions::default(), &NoopAdvisor);
        assert!(!report.has_content());
        assert!(report.metrics.is_none());
        assert_eq!(report.paragraph_count, 0);
        assert!(report.flags.is_empty());
    }

    #[test]
    fn blank_paragraphs_are_ignored() {
        let doc = PageDocument::new().with_paragraph("   ").with_paragraph("");
        let report = analyze_content(&doc, &ContentOptions::default(), &NoopAdvisor);
        assert!(report.metrics.is_none());
    }

    #[test]
    fn metrics_cover_joined_paragraphs() {
        let doc = PageDocument::new()
            .with_paragraph("The cat sat.")
            .with_paragraph("The dog ran fast.");
        let report = analyze_content(&doc, &ContentOptions::default(), &NoopAdvisor);
        let metrics = report.metrics.expect("content present");
        assert_eq!(report.paragraph_count, 2);
        assert_eq!(metrics.word_count, 7);
        assert_eq!(metrics.sentence_count, 2);
    }

    #[test]
    fn flags_long_paragraphs_and_sentences() {
        let long = format!("{}.", words(30));
        let doc = PageDocument::new()
            .with_paragraph("Short one.")
            .with_paragraph(long);
        let options = ContentOptions {
            long_paragraph_words: 20,
            long_sentence_words: 25,
        };
        let report = analyze_content(&doc, &options, &NoopAdvisor);

        assert_eq!(report.long_paragraphs.len(), 1);
        assert_eq!(report.long_paragraphs[0].position, 2);
        assert_eq!(report.long_paragraphs[0].word_count, 30);
        assert!(report.long_paragraphs[0].preview.ends_with("..."));

        assert_eq!(report.long_sentences.len(), 1);
        assert_eq!(report.long_sentences[0].position, 2);
        assert!(report.long_sentences[0].suggestion.is_none());
    }

    #[test]
    fn advisor_failure_does_not_change_analysis() {
        let doc = PageDocument::new().with_paragraph(format!("{}.", words(200)));
        let options = ContentOptions::default();

        let baseline = analyze_content(&doc, &options, &NoopAdvisor);
        let failed = analyze_content(&doc, &options, &FailingAdvisor);

        assert_eq!(failed.metrics, baseline.metrics);
        assert_eq!(failed.flags, baseline.flags);
        assert_eq!(failed.long_paragraphs, baseline.long_paragraphs);
        assert_eq!(failed.long_sentences, baseline.long_sentences);
        // One paragraph and one sentence were flagged.
        assert_eq!(failed.suggestion_failures, 2);
        assert_eq!(baseline.suggestion_failures, 0);
    }

    #[test]
    fn invalid_advisor_response_counts_as_failure() {
        let doc = PageDocument::new().with_paragraph(format!("{}.", words(200)));
        let report = analyze_content(&doc, &ContentOptions::default(), &GarbledSentenceAdvisor);

        assert_eq!(report.suggestion_failures, 1);
        assert_eq!(
            report.long_paragraphs[0].suggestion.as_deref(),
            Some("Shorter paragraph.")
        );
        assert!(report.long_sentences[0].suggestion.is_none());
        assert_eq!(
            AdvisorError::InvalidResponse("empty body".into()).to_string(),
            "invalid advisor response: empty body"
        );
    }

    #[test]
    fn suggestions_are_attached() {
        let doc = PageDocument::new().with_paragraph(format!("{}.", words(30)));
        let report = analyze_content(&doc, &ContentOptions::default(), &ShoutingAdvisor);
        let sentence = &report.long_sentences[0];
        assert!(
            sentence
                .suggestion
                .as_deref()
                .is_some_and(|s| s.starts_with("WORD"))
        );
    }

    #[test]
    fn swedish_pages_use_scandinavian_rules() {
        let doc = PageDocument::new()
            .with_language("sv-SE")
            .with_paragraph("Katten satt på mattan.");
        let report = analyze_content(&doc, &ContentOptions::default(), &NoopAdvisor);
        assert_eq!(report.language, "sv");
        assert_eq!(report.profile, ReadabilityProfile::Scandinavian);
    }
}
