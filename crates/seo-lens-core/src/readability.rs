//! Readability scoring.
//!
//! Computes five formulas from word, sentence, syllable, and character
//! counts:
//!
//! - Flesch Reading Ease: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//! - Flesch-Kincaid Grade: `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`
//! - Gunning Fog: `0.4 * ((words/sentences) + 100 * (complex/words))`
//! - Coleman-Liau: `0.0588 * (100 * chars/words) - 0.296 * (100 * sentences/words) - 15.8`
//! - LIX: `(words/sentences) + 100 * (long/words)`
//!
//! LIX counts words longer than 6 characters inside its formula, while the
//! reported [`ReadabilityMetrics::long_word_count`] counts words longer than
//! 15 characters. The two thresholds are intentionally separate fields.
//!
//! Empty input divides by zero and yields non-finite scores. Callers must
//! check [`f64::is_finite`] before displaying a score.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::syllables;
use crate::text;

/// Words with more syllables than this are "complex" (Gunning Fog).
const COMPLEX_WORD_SYLLABLES: usize = 2;

/// Characters above which a word counts as long inside the LIX formula.
const LIX_LONG_WORD_CHARS: usize = 6;

/// Characters above which a word is reported in `long_word_count`.
const REPORTED_LONG_WORD_CHARS: usize = 15;

/// Counts and scores for a block of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityMetrics {
    /// Whitespace-delimited words.
    pub word_count: usize,
    /// Sentences (segments between runs of `.`, `!`, `?`).
    pub sentence_count: usize,
    /// Estimated syllables.
    pub syllable_count: usize,
    /// Words with more than two estimated syllables.
    pub complex_word_count: usize,
    /// Words longer than 15 characters.
    pub long_word_count: usize,
    /// Average words per sentence.
    pub avg_words_per_sentence: f64,
    /// Average syllables per word.
    pub avg_syllables_per_word: f64,
    /// Average non-whitespace characters per word.
    pub avg_characters_per_word: f64,
    /// Flesch Reading Ease (higher is easier).
    pub flesch_reading_ease: f64,
    /// Flesch-Kincaid Grade Level.
    pub flesch_kincaid_grade: f64,
    /// Gunning Fog index.
    pub gunning_fog: f64,
    /// Coleman-Liau index.
    pub coleman_liau: f64,
    /// Läsbarhetsindex (LIX).
    pub lix: f64,
}

impl ReadabilityMetrics {
    /// Share of complex words, `complex / words`.
    pub fn complex_word_ratio(&self) -> f64 {
        self.complex_word_count as f64 / self.word_count as f64
    }
}

/// Compute readability metrics for `text`.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn compute_metrics(text: &str) -> ReadabilityMetrics {
    let words = text::split_words(text);
    let word_count = words.len();
    let sentence_count = text::split_sentences(text).len();
    let character_count = text::count_characters(text);

    let mut syllable_count = 0;
    let mut complex_word_count = 0;
    let mut lix_long_words = 0;
    let mut long_word_count = 0;
    for word in &words {
        let syllables = syllables::count_word_syllables(word);
        syllable_count += syllables;
        if syllables > COMPLEX_WORD_SYLLABLES {
            complex_word_count += 1;
        }
        let chars = word.chars().count();
        if chars > LIX_LONG_WORD_CHARS {
            lix_long_words += 1;
        }
        if chars > REPORTED_LONG_WORD_CHARS {
            long_word_count += 1;
        }
    }

    let w = word_count as f64;
    let s = sentence_count as f64;
    let words_per_sentence = w / s;
    let syllables_per_word = syllable_count as f64 / w;
    let characters_per_word = character_count as f64 / w;

    let flesch_reading_ease =
        1.015f64.mul_add(-words_per_sentence, 206.835) - 84.6 * syllables_per_word;
    let flesch_kincaid_grade =
        0.39f64.mul_add(words_per_sentence, 11.8 * syllables_per_word) - 15.59;
    let gunning_fog = 0.4 * (words_per_sentence + 100.0 * (complex_word_count as f64 / w));
    let coleman_liau =
        0.0588f64.mul_add(100.0 * characters_per_word, -0.296 * (100.0 * s / w)) - 15.8;
    let lix = words_per_sentence + 100.0 * (lix_long_words as f64 / w);

    tracing::debug!(
        word_count,
        sentence_count,
        syllable_count,
        flesch_reading_ease,
        lix,
        "computed readability metrics"
    );

    ReadabilityMetrics {
        word_count,
        sentence_count,
        syllable_count,
        complex_word_count,
        long_word_count,
        avg_words_per_sentence: words_per_sentence,
        avg_syllables_per_word: syllables_per_word,
        avg_characters_per_word: characters_per_word,
        flesch_reading_ease,
        flesch_kincaid_grade,
        gunning_fog,
        coleman_liau,
        lix,
    }
}

/// Which set of readability rules applies to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ReadabilityProfile {
    /// Swedish text: judged by LIX and a shorter sentence limit.
    Scandinavian,
    /// Everything else: judged by Flesch Reading Ease.
    Default,
}

impl ReadabilityProfile {
    /// Select the profile for a language hint such as `"en"` or `"sv"`.
    pub fn for_language(hint: &str) -> Self {
        if hint == "sv" {
            Self::Scandinavian
        } else {
            Self::Default
        }
    }

    /// Maximum average words per sentence before a flag is raised.
    pub const fn max_words_per_sentence(self) -> f64 {
        match self {
            Self::Scandinavian => 15.0,
            Self::Default => 20.0,
        }
    }
}

/// Label for a Flesch Reading Ease score.
pub fn flesch_label(score: f64) -> &'static str {
    match score {
        s if s >= 90.0 => "Very Easy",
        s if s >= 80.0 => "Easy",
        s if s >= 70.0 => "Fairly Easy",
        s if s >= 60.0 => "Standard",
        s if s >= 50.0 => "Fairly Difficult",
        s if s >= 30.0 => "Difficult",
        _ => "Very Difficult",
    }
}

/// Label for a LIX score.
pub fn lix_label(score: f64) -> &'static str {
    match score {
        s if s < 30.0 => "Very Easy",
        s if s < 40.0 => "Easy",
        s if s < 50.0 => "Medium",
        s if s < 60.0 => "Difficult",
        _ => "Very Difficult",
    }
}

/// A readability problem worth recommending a fix for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReadabilityFlag {
    /// Sentences are too long on average.
    LongSentences {
        /// Average words per sentence.
        average: f64,
        /// The profile's limit.
        limit: f64,
    },
    /// More than 20% of words have three or more syllables.
    ComplexWords {
        /// Share of complex words (0--1).
        ratio: f64,
    },
    /// Flesch Reading Ease below 60.
    LowReadingEase {
        /// The score.
        score: f64,
    },
    /// LIX above 50.
    HighLix {
        /// The score.
        score: f64,
    },
}

/// Evaluate `metrics` against the rules for `profile`.
///
/// Non-finite values never raise a flag.
pub fn readability_flags(
    metrics: &ReadabilityMetrics,
    profile: ReadabilityProfile,
) -> Vec<ReadabilityFlag> {
    let mut flags = Vec::new();
    let average = metrics.avg_words_per_sentence;
    let limit = profile.max_words_per_sentence();

    if average.is_finite() && average > limit {
        flags.push(ReadabilityFlag::LongSentences { average, limit });
    }

    match profile {
        ReadabilityProfile::Scandinavian => {
            if metrics.lix.is_finite() && metrics.lix > 50.0 {
                flags.push(ReadabilityFlag::HighLix { score: metrics.lix });
            }
        }
        ReadabilityProfile::Default => {
            let ratio = metrics.complex_word_ratio();
            if ratio.is_finite() && ratio > 0.2 {
                flags.push(ReadabilityFlag::ComplexWords { ratio });
            }
            let score = metrics.flesch_reading_ease;
            if score.is_finite() && score < 60.0 {
                flags.push(ReadabilityFlag::LowReadingEase { score });
            }
        }
    }

    flags
}
