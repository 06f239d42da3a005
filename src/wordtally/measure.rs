//! # Word Measure
//!
//! Turns a document's full text into a word count. The count is what the
//! ledger stores as `pre`/`cur`, so it must be stable: the same text always
//! yields the same number, across versions.
//!
//! ## Segmentation
//!
//! Text is scanned for maximal runs of two disjoint character classes:
//!
//! - **token runs**: ASCII letters, digits and `_`, Greek (U+0392..U+03C9),
//!   Latin-1 letters (U+00C0..U+00FF) and Arabic (U+0600..U+06FF).
//!   A whole run is one word.
//! - **ideograph runs**: CJK Unified Ideographs, Extension A, Compatibility
//!   Ideographs, Hiragana and Hangul syllables. Each character is a word.
//!
//! Everything else (whitespace, punctuation, scripts not listed) separates
//! runs and is not counted.
//!
//! ## Run weighting
//!
//! A run's weight is decided by its *first* character only: if the code point
//! is above U+4E00 the run counts one word per character, otherwise the run
//! counts as a single word. Runs that start with Extension A, Hiragana, or
//! U+4E00 itself therefore count once. Historical counts depend on this, so
//! it is kept as is.

use once_cell::sync::Lazy;
use regex::Regex;

/// Code point of U+4E00. Runs whose first char is strictly above it are
/// counted per character.
const IDEOGRAPH_THRESHOLD: u32 = 19968;

static WORD_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[a-zA-Z0-9_\x{0392}-\x{03c9}\x{00c0}-\x{00ff}\x{0600}-\x{06ff}]+",
        r"|",
        r"[\x{4e00}-\x{9fff}\x{3400}-\x{4dbf}\x{f900}-\x{faff}\x{3040}-\x{309f}\x{ac00}-\x{d7af}]+",
    ))
    .expect("word run pattern is valid")
});

/// Count the words in `text`.
pub fn measure(text: &str) -> u64 {
    WORD_RUN
        .find_iter(text)
        .map(|run| run_weight(run.as_str()))
        .sum()
}

fn run_weight(run: &str) -> u64 {
    match run.chars().next() {
        Some(first) if u32::from(first) > IDEOGRAPH_THRESHOLD => run.chars().count() as u64,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_unmatched_input_is_zero() {
        assert_eq!(measure(""), 0);
        assert_eq!(measure("   "), 0);
        assert_eq!(measure("!!!"), 0);
        assert_eq!(measure("\n\t -- ... ?!"), 0);
    }

    #[test]
    fn ascii_tokens_count_once() {
        assert_eq!(measure("hello world"), 2);
        assert_eq!(measure("hello world again"), 3);
        assert_eq!(measure("snake_case and CamelCase 42"), 4);
    }

    #[test]
    fn punctuation_splits_tokens() {
        assert_eq!(measure("don't"), 2);
        assert_eq!(measure("e-mail, web.site"), 4);
    }

    #[test]
    fn latin1_greek_and_arabic_join_token_runs() {
        assert_eq!(measure("café crème"), 2);
        assert_eq!(measure("Ωmega λογος"), 2);
        assert_eq!(measure("مرحبا بالعالم"), 2);
    }

    #[test]
    fn cjk_ideographs_count_per_character() {
        assert_eq!(measure("你好世界"), 4);
        assert_eq!(measure("漢字 文字"), 4);
    }

    #[test]
    fn hangul_counts_per_character() {
        assert_eq!(measure("안녕하세요"), 5);
    }

    #[test]
    fn mixed_script_sums_runs() {
        // "hello" token + 2 ideographs
        assert_eq!(measure("hello世界"), 3);
        assert_eq!(measure("Rust 很好 indeed"), 4);
    }

    #[test]
    fn runs_below_threshold_count_once() {
        // Hiragana run
        assert_eq!(measure("ひらがな"), 1);
        // Extension A start
        assert_eq!(measure("\u{3400}\u{3401}\u{3402}"), 1);
        // U+4E00 is the threshold itself, not above it
        assert_eq!(measure("\u{4e00}\u{4e8c}\u{4e09}"), 1);
        // Same characters, different first char
        assert_eq!(measure("\u{4e8c}\u{4e00}\u{4e09}"), 3);
    }

    #[test]
    fn first_char_decides_mixed_ideograph_run() {
        // Hiragana followed by kanji stays one run, weighted by the kana
        assert_eq!(measure("ひ漢字"), 1);
        assert_eq!(measure("漢字ひ"), 3);
    }

    #[test]
    fn unlisted_scripts_are_ignored() {
        assert_eq!(measure("привет"), 0);
        assert_eq!(measure("カタカナ"), 0);
    }

    #[test]
    fn measure_is_deterministic() {
        let text = "Some text, 一些文字, and more.";
        assert_eq!(measure(text), measure(text));
    }
}
