//! Text processing utilities.
//!
//! Provides the normalizer used for keyword matching, plus the word,
//! sentence, and character segmentation used by the readability scorer.
//! Normalized text is only ever used for matching and grouping; anything
//! shown to the user keeps its original casing.

use regex::Regex;
use std::sync::LazyLock;

/// Punctuation removed by [`normalize`].
static PUNCTUATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.,/#!$%^&*;:{}=\-_`~()]").expect("valid regex"));

/// Runs of whitespace, collapsed by [`normalize`].
static WHITESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Sentence terminators: any run of `.`, `!` or `?`.
static SENTENCE_TERMINATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Normalize text for matching.
///
/// Lowercases, strips the punctuation set `. , / # ! $ % ^ & * ; : { } = - _ ` ~ ( )`,
/// collapses whitespace to single spaces and trims both ends.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = PUNCTUATION_PATTERN.replace_all(&lowered, "");
    WHITESPACE_PATTERN
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Split text into whitespace-delimited, non-empty tokens.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Count whitespace-delimited words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split text into sentences on runs of `.`, `!` and `?`.
///
/// Segments are trimmed; empty segments are dropped. Terminators are not
/// kept, so `"Hi. There!"` yields `["Hi", "There"]`.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_TERMINATORS
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Count non-whitespace characters.
pub fn count_characters(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Shorten text to at most `max_chars` characters, appending `...` when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
