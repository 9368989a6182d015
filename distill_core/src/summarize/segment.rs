//! Text cleanup and sentence segmentation.

use regex::Regex;
use std::sync::OnceLock;

/// Shortest segment accepted as a sentence, in characters.
pub const MIN_SENTENCE_LEN: usize = 20;

/// Longest segment accepted as a sentence, in characters.
pub const MAX_SENTENCE_LEN: usize = 200;

/// Cleaned texts shorter than this are returned as-is.
pub const SHORT_TEXT_THRESHOLD: usize = 200;

/// Structural placeholders emitted by the page-to-text step and by the digest
/// formatter: `[SECTION]`, `[IMAGE: alt]`, `[LINK: href]`, `[FIELD: name]`, ...
static MARKER_PATTERN: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_PATTERN: OnceLock<Regex> = OnceLock::new();
static NAIVE_SENTENCE_PATTERN: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn marker_pattern() -> &'static Regex {
    MARKER_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)\[\s*(?:section|heading|image|img|link|field|button|table|list|keywords)\b[^\]]*\]",
        )
        .expect("Static regex pattern is guaranteed to be valid")
    })
}

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn whitespace_pattern() -> &'static Regex {
    WHITESPACE_PATTERN.get_or_init(|| {
        Regex::new(r"\s+").expect("Static regex pattern is guaranteed to be valid")
    })
}

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn naive_sentence_pattern() -> &'static Regex {
    NAIVE_SENTENCE_PATTERN.get_or_init(|| {
        Regex::new(r"[^.!?]+[.!?]*").expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Words that end in a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "inc", "ltd",
    "co", "corp", "fig", "approx", "dept", "est", "jan", "feb", "mar", "apr", "jun", "jul",
    "aug", "sep", "sept", "oct", "nov", "dec", "u.s", "u.k", "a.m", "p.m",
];

/// A sentence candidate and its position among the accepted candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    pub position: usize,
}

impl Sentence {
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Strip structural markers and collapse whitespace.
#[must_use]
pub fn clean(text: &str) -> String {
    let stripped = marker_pattern().replace_all(text, " ");
    whitespace_pattern()
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

const fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…' | '。' | '！' | '？')
}

const fn is_wide_terminal(c: char) -> bool {
    matches!(c, '。' | '！' | '？')
}

const fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | '”' | '’' | ')' | ']' | '»' | '」' | '』')
}

fn trim_word(word: &str) -> &str {
    word.trim_start_matches(|c: char| !c.is_alphanumeric())
}

/// Whether the word directly before a period is an abbreviation or initial.
///
/// A lone capital is an initial only when it opens the segment or follows
/// another capitalized word ("J. Doe", "John F. Kennedy"); "vitamin C." and
/// the pronoun "I." end their sentence.
fn ends_with_abbreviation(before: &str) -> bool {
    let mut words = before.split_whitespace().rev().map(trim_word);
    let word = words.next().unwrap_or_default();
    if word.is_empty() {
        return false;
    }
    let mut chars = word.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        if !first.is_uppercase() || first == 'I' {
            return false;
        }
        return words
            .next()
            .and_then(|previous| previous.chars().next())
            .is_none_or(char::is_uppercase);
    }
    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

/// Split text into raw sentence segments without length filtering.
///
/// A boundary is a run of terminal punctuation (plus closing quotes or
/// brackets) followed by whitespace or the end of text. Full-width CJK
/// terminals end a sentence without trailing whitespace.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        if !is_terminal(c) {
            i += 1;
            continue;
        }

        let mut end = i + 1;
        let mut wide = is_wide_terminal(c);
        while end < chars.len() && (is_terminal(chars[end].1) || is_closer(chars[end].1)) {
            wide |= is_wide_terminal(chars[end].1);
            end += 1;
        }

        let at_break = end == chars.len() || chars[end].1.is_whitespace() || wide;
        let abbreviation = c == '.' && end == i + 1 && ends_with_abbreviation(&text[start..offset]);

        if at_break && !abbreviation {
            let byte_end = chars.get(end).map_or(text.len(), |&(o, _)| o);
            let segment = text[start..byte_end].trim();
            if !segment.is_empty() {
                segments.push(segment.to_string());
            }
            start = byte_end;
        }
        i = end;
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        segments.push(tail.to_string());
    }
    segments
}

/// Whether a segment qualifies as a [`Sentence`].
#[must_use]
pub fn is_valid_sentence(segment: &str) -> bool {
    let len = segment.chars().count();
    (MIN_SENTENCE_LEN..=MAX_SENTENCE_LEN).contains(&len) && segment.chars().any(char::is_alphabetic)
}

/// Segment cleaned text into positioned sentence candidates.
#[must_use]
pub fn segment(cleaned: &str) -> Vec<Sentence> {
    split_sentences(cleaned)
        .into_iter()
        .filter(|s| is_valid_sentence(s))
        .enumerate()
        .map(|(position, text)| Sentence { text, position })
        .collect()
}

/// The first `limit` pieces of a plain punctuation split.
#[must_use]
pub fn naive_pieces(text: &str, limit: usize) -> Vec<&str> {
    naive_sentence_pattern()
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .take(limit)
        .collect()
}

/// Plain punctuation split used when the extractive tier cannot run: the
/// first `limit` pieces joined with single spaces.
#[must_use]
pub fn naive_split(text: &str, limit: usize) -> String {
    naive_pieces(text, limit).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_markers_and_whitespace() {
        let raw = "[SECTION: Intro]\n  First   line.\t[IMAGE: a cat] Second [link: /x] line.\n";
        assert_eq!(clean(raw), "First line. Second line.");
    }

    #[test]
    fn clean_keeps_ordinary_brackets() {
        assert_eq!(clean("See [1] and [note]."), "See [1] and [note].");
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        let segments = split_sentences("One fish. Two fish! Red fish? Blue fish");
        assert_eq!(segments, vec!["One fish.", "Two fish!", "Red fish?", "Blue fish"]);
    }

    #[test]
    fn keeps_closing_quotes_with_sentence() {
        let segments = split_sentences("He said \"stop.\" Then he left.");
        assert_eq!(segments, vec!["He said \"stop.\"", "Then he left."]);
    }

    #[test]
    fn does_not_split_abbreviations_or_decimals() {
        let segments =
            split_sentences("Dr. Smith paid 3.50 dollars, e.g. for tea. J. Doe agreed.");
        assert_eq!(
            segments,
            vec!["Dr. Smith paid 3.50 dollars, e.g. for tea.", "J. Doe agreed."]
        );
    }

    #[test]
    fn single_letter_after_lowercase_word_ends_sentence() {
        let segments = split_sentences(
            "The doctor told every patient to take vitamin C. The patients followed that advice for a month.",
        );
        assert_eq!(
            segments,
            vec![
                "The doctor told every patient to take vitamin C.",
                "The patients followed that advice for a month."
            ]
        );
    }

    #[test]
    fn pronoun_i_ends_sentence() {
        let segments = split_sentences(
            "Nobody expected the result except me and I. Then the council met again on Friday.",
        );
        assert_eq!(
            segments,
            vec![
                "Nobody expected the result except me and I.",
                "Then the council met again on Friday."
            ]
        );
    }

    #[test]
    fn middle_initials_stay_in_sentence() {
        let segments = split_sentences("We read about John F. Kennedy today. It was long.");
        assert_eq!(
            segments,
            vec!["We read about John F. Kennedy today.", "It was long."]
        );
    }

    #[test]
    fn splits_full_width_terminals_without_space() {
        let segments = split_sentences("今天下雨了。我们待在家里！");
        assert_eq!(segments, vec!["今天下雨了。", "我们待在家里！"]);
    }

    #[test]
    fn ellipsis_run_is_one_boundary() {
        let segments = split_sentences("Wait... what happened?! Nothing.");
        assert_eq!(segments, vec!["Wait...", "what happened?!", "Nothing."]);
    }

    #[test]
    fn segment_filters_by_length_and_content() {
        let text = "Too short. 1234567890 1234567890 1234. \
                    This sentence is long enough to count.";
        let sentences = segment(text);
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text, "This sentence is long enough to count.");
        assert_eq!(sentences[0].position, 0);
    }

    #[test]
    fn segment_rejects_overlong_sentences() {
        let long = format!("{}.", "word ".repeat(60));
        assert!(segment(&long).is_empty());
    }

    #[test]
    fn naive_split_keeps_first_pieces() {
        let text = "A. B! C? D. E. F.";
        assert_eq!(naive_split(text, 4), "A. B! C? D.");
    }

    #[test]
    fn naive_split_without_punctuation_returns_text() {
        assert_eq!(naive_split("no punctuation here", 4), "no punctuation here");
    }
}
