//! Heuristic syllable counting.
//!
//! A cheap, deterministic estimate: no dictionary, no phonetics. Counts
//! runs of vowels after dropping a silent trailing `e`/`es`/`ed` and a
//! leading `y`. Results are reproducible, not linguistically exact.

use regex::Regex;
use std::sync::LazyLock;

/// Trailing silent suffix: a non-vowel followed by `es`, `ed`, or `e`.
static SILENT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^aeiouy](?:es|ed|e)$").expect("valid regex"));

/// Leading `y`, which acts as a consonant.
static LEADING_Y: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^y").expect("valid regex"));

/// A maximal run of vowels (including `y`).
static VOWEL_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[aeiouy]+").expect("valid regex"));

/// Estimate the syllables in a single word. Always at least 1.
///
/// Every Unicode letter is kept (`ñ`, `å`, `é`) and counts toward the
/// short-word length; only `a e i o u y` count as vowels.
pub fn count_word_syllables(word: &str) -> usize {
    let letters: String = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    if letters.chars().count() <= 3 {
        return 1;
    }

    let trimmed = SILENT_SUFFIX.replace(&letters, "");
    let trimmed = LEADING_Y.replace(&trimmed, "");

    VOWEL_RUN.find_iter(&trimmed).count().max(1)
}

/// Estimate the syllables in a text by summing over its whitespace tokens.
pub fn count_text_syllables(text: &str) -> usize {
    text.split_whitespace().map(count_word_syllables).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_words_are_one_syllable() {
        assert_eq!(count_word_syllables("cat"), 1);
        assert_eq!(count_word_syllables("a"), 1);
        assert_eq!(count_word_syllables("the"), 1);
        // Punctuation is stripped before the length check.
        assert_eq!(count_word_syllables("mat."), 1);
    }

    #[test]
    fn vowel_runs() {
        assert_eq!(count_word_syllables("banana"), 3);
        assert_eq!(count_word_syllables("energy"), 3);
        assert_eq!(count_word_syllables("readable"), 2);
        assert_eq!(count_word_syllables("beautiful"), 3);
    }

    #[test]
    fn silent_suffixes_dropped() {
        // "make" -> "ma"
        assert_eq!(count_word_syllables("make"), 1);
        // "jumped" -> "jum"
        assert_eq!(count_word_syllables("jumped"), 1);
        // "boxes" -> "bo"
        assert_eq!(count_word_syllables("boxes"), 1);
    }

    #[test]
    fn leading_y_is_a_consonant() {
        // "yellow" -> "ellow" -> e, o
        assert_eq!(count_word_syllables("yellow"), 2);
    }

    #[test]
    fn never_below_one() {
        assert_eq!(count_word_syllables("rhythm"), 1);
        assert_eq!(count_word_syllables("bcdfg"), 1);
        assert_eq!(count_word_syllables(""), 1);
        assert_eq!(count_word_syllables("2024"), 1);
    }

    #[test]
    fn non_ascii_letters_are_kept() {
        // "piata" would be a single vowel run; the ñ keeps i and a apart.
        assert_eq!(count_word_syllables("piñata"), 3);
        assert_eq!(count_word_syllables("niño"), 2);
        // Length is measured in letters, not bytes.
        assert_eq!(count_word_syllables("idé"), 1);
        assert_eq!(count_word_syllables("ÅNGEST"), count_word_syllables("ångest"));
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(count_word_syllables("BANANA"), count_word_syllables("banana"));
    }

    #[test]
    fn text_sums_words() {
        assert_eq!(count_text_syllables("The cat sat on the mat."), 6);
        assert_eq!(count_text_syllables("banana energy"), 6);
        assert_eq!(count_text_syllables(""), 0);
    }
}
