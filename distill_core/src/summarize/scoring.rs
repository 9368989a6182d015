//! Multi-factor sentence scoring.
//!
//! `score = avg_relevance × position_bonus × length_penalty × category_bonus`
//!
//! Relevance comes from the document's own frequency table; the other three
//! factors encode where each category tends to put its substance and what
//! its diagnostic phrasing looks like.

use regex::Regex;
use std::sync::OnceLock;

use super::frequency::{WordFrequencyTable, content_words};
use super::segment::Sentence;
use crate::ContentCategory;

/// Sentences shorter than this are penalized.
const SHORT_SENTENCE_LEN: usize = 50;
/// Sentences longer than this are penalized.
const LONG_SENTENCE_LEN: usize = 150;
const NUMERAL_BONUS: f64 = 1.1;

/// A candidate sentence with its score and original position.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence {
    pub text: String,
    pub score: f64,
    pub position: usize,
}

impl ScoredSentence {
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

struct PhraseBonus {
    category: ContentCategory,
    pattern: Regex,
    multiplier: f64,
}

static PHRASE_BONUSES: OnceLock<Vec<PhraseBonus>> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex patterns validated at compile time"
)]
fn phrase_bonuses() -> &'static [PhraseBonus] {
    PHRASE_BONUSES.get_or_init(|| {
        [
            (
                ContentCategory::News,
                r"(?i)\b(?:said|says|told|reported|according to|announced|confirmed|stated)\b",
                1.3,
            ),
            (
                ContentCategory::ECommerce,
                r"(?i)(?:[$€£]\s?\d|\b(?:price|priced|specifications?|dimensions|weight|warranty|model|capacity|battery)\b)",
                1.4,
            ),
            (
                ContentCategory::Form,
                r"(?i)\b(?:must|required|please|enter|provide|select|should|need to)\b",
                1.3,
            ),
            (
                ContentCategory::Educational,
                r"(?i)\b(?:is defined as|refers to|is called|means|is an?|are an?|for example|consists? of)\b",
                1.2,
            ),
            (
                ContentCategory::Article,
                r"(?i)\b(?:because|therefore|as a result|in conclusion|suggests?|shows?)\b",
                1.1,
            ),
            (
                ContentCategory::Blog,
                r"(?i)\b(?:i|i'm|i've|my|we)\b",
                1.1,
            ),
        ]
        .into_iter()
        .map(|(category, pattern, multiplier)| PhraseBonus {
            category,
            pattern: Regex::new(pattern).expect("Static regex pattern is guaranteed to be valid"),
            multiplier,
        })
        .collect()
    })
}

/// Mean frequency weight over the sentence's content words, 0 if it has none.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "Word counts stay far below f64 mantissa range"
)]
pub fn average_relevance(text: &str, table: &WordFrequencyTable) -> f64 {
    let (sum, count) = content_words(text).fold((0.0, 0usize), |(sum, count), word| {
        (sum + table.weight(&word), count + 1)
    });
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Category-specific preference for where a sentence sits in the document.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "Sentence positions stay far below f64 mantissa range"
)]
pub fn position_bonus(category: ContentCategory, position: usize, total: usize) -> f64 {
    let relative = if total == 0 {
        0.0
    } else {
        position as f64 / total as f64
    };

    match category {
        ContentCategory::News => {
            if position == 0 {
                2.0
            } else if relative < 0.3 {
                1.3
            } else {
                1.0
            }
        }
        ContentCategory::Article | ContentCategory::Educational => {
            let lead = if category == ContentCategory::Article {
                1.8
            } else {
                1.6
            };
            if position == 0 {
                lead
            } else if relative < 0.2 {
                1.4
            } else if relative >= 0.8 {
                1.3
            } else {
                1.0
            }
        }
        ContentCategory::Form => {
            if relative < 0.4 {
                1.5
            } else {
                1.0
            }
        }
        ContentCategory::ECommerce => {
            if relative < 0.3 {
                1.6
            } else {
                1.0
            }
        }
        ContentCategory::Blog | ContentCategory::Navigation | ContentCategory::Unknown => {
            if position == 0 {
                1.5
            } else if relative < 0.25 {
                1.3
            } else if relative < 0.5 {
                1.15
            } else if relative < 0.75 {
                1.05
            } else {
                1.0
            }
        }
    }
}

/// Penalty for very short or very long sentences.
#[must_use]
pub const fn length_penalty(char_len: usize) -> f64 {
    if char_len < SHORT_SENTENCE_LEN {
        0.8
    } else if char_len > LONG_SENTENCE_LEN {
        0.9
    } else {
        1.0
    }
}

/// Bonus for category-diagnostic phrasing and for concrete numbers.
#[must_use]
pub fn category_bonus(category: ContentCategory, text: &str) -> f64 {
    let phrase = phrase_bonuses()
        .iter()
        .filter(|bonus| bonus.category == category && bonus.pattern.is_match(text))
        .map(|bonus| bonus.multiplier)
        .fold(1.0, |acc, m| acc * m);

    if text.chars().any(|c| c.is_ascii_digit()) {
        phrase * NUMERAL_BONUS
    } else {
        phrase
    }
}

/// Score every candidate sentence.
#[must_use]
pub fn score_sentences(
    sentences: &[Sentence],
    table: &WordFrequencyTable,
    category: ContentCategory,
) -> Vec<ScoredSentence> {
    let total = sentences.len();
    sentences
        .iter()
        .map(|sentence| {
            let relevance = average_relevance(&sentence.text, table);
            let score = relevance
                * position_bonus(category, sentence.position, total)
                * length_penalty(sentence.char_len())
                * category_bonus(category, &sentence.text);
            ScoredSentence {
                text: sentence.text.clone(),
                score,
                position: sentence.position,
            }
        })
        .collect()
}
