//! Advisory port for text-improvement suggestions.
//!
//! Content analysis can ask an [`Advisor`] to rewrite an overlong paragraph
//! or sentence. Suggestions are optional: an advisor may return nothing or
//! fail, and the analysis result is the same either way.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// What kind of text is being improved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// A whole paragraph.
    Paragraph,
    /// A single sentence.
    Sentence,
}

/// Limits the suggestion should respect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SuggestionConstraints {
    /// Target maximum length in words.
    pub max_words: usize,
    /// Language hint of the page (e.g. `"en"`).
    pub language: String,
}

/// Source of optional "improve this text" suggestions.
pub trait Advisor {
    /// Suggest a better version of `text`.
    ///
    /// `Ok(None)` means the advisor has nothing to offer.
    fn suggest_improvement(
        &self,
        text: &str,
        kind: SuggestionKind,
        constraints: &SuggestionConstraints,
    ) -> Result<Option<String>, AdvisorError>;
}

/// An advisor that never suggests anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAdvisor;

impl Advisor for NoopAdvisor {
    fn suggest_improvement(
        &self,
        _text: &str,
        _kind: SuggestionKind,
        _constraints: &SuggestionConstraints,
    ) -> Result<Option<String>, AdvisorError> {
        Ok(None)
    }
}

impl<A: Advisor + ?Sized> Advisor for &A {
    fn suggest_improvement(
        &self,
        text: &str,
        kind: SuggestionKind,
        constraints: &SuggestionConstraints,
    ) -> Result<Option<String>, AdvisorError> {
        (**self).suggest_improvement(text, kind, constraints)
    }
}
