//! Extractive summarization.
//!
//! The extractive tier works with no external help at all:
//!
//! 1. [`segment::clean`] strips structural markers and collapses whitespace;
//!    short pages come back unchanged.
//! 2. [`segment::segment`] splits sentences and drops fragments; pages with
//!    no more sentences than the policy minimum come back unchanged.
//! 3. [`frequency::WordFrequencyTable`] weighs the document's content words.
//! 4. [`scoring::score_sentences`] combines relevance with position, length
//!    and category bonuses.
//! 5. [`selection::select`] fills the policy's length and count budgets and
//!    [`selection::reassemble`] restores document order.
//!
//! The hard cap in [`truncate`] is applied by the caller, after whichever
//! tier produced the text.

pub mod frequency;
pub mod scoring;
pub mod segment;
pub mod selection;
mod stopwords;
pub mod truncate;

pub use frequency::WordFrequencyTable;
pub use scoring::ScoredSentence;
pub use segment::{
    MAX_SENTENCE_LEN, MIN_SENTENCE_LEN, SHORT_TEXT_THRESHOLD, Sentence, clean, naive_pieces,
    naive_split, segment, split_sentences,
};
pub use stopwords::is_stopword;
pub use truncate::{ELLIPSIS, hard_cap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ContentCategory;
use crate::error::{DistillError, Result};
use crate::policy::CompressionPolicy;

/// Pieces kept by the naive-split tier.
pub const NAIVE_SENTENCE_LIMIT: usize = 4;

/// How the extractive tier arrived at its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractiveOutcome {
    /// Sentences were scored and selected.
    Summarized,
    /// Cleaned text was below the summarization threshold.
    ShortInput,
    /// Too few sentences to be worth trimming.
    TooFewSentences,
}

/// Output of the extractive tier before the hard cap.
#[derive(Debug, Clone)]
pub struct ExtractiveSummary {
    pub text: String,
    pub outcome: ExtractiveOutcome,
    /// Cleaned input length in characters.
    pub original_length: usize,
    pub available_sentences: usize,
    pub selected_sentences: usize,
}

/// Run the extractive algorithm over already-cleaned text.
///
/// # Errors
/// Returns [`DistillError::NoSentences`] when no segment qualifies as a
/// sentence and [`DistillError::EmptySelection`] when selection yields
/// nothing; callers fall back to [`naive_split`].
pub fn extract(
    cleaned: &str,
    category: ContentCategory,
    policy: &CompressionPolicy,
) -> Result<ExtractiveSummary> {
    let original_length = cleaned.chars().count();
    let sentences = segment::segment(cleaned);
    let available = sentences.len();

    if original_length < SHORT_TEXT_THRESHOLD {
        debug!("Input below summarization threshold ({original_length} chars)");
        return Ok(ExtractiveSummary {
            text: cleaned.to_string(),
            outcome: ExtractiveOutcome::ShortInput,
            original_length,
            available_sentences: available,
            selected_sentences: available,
        });
    }

    if sentences.is_empty() {
        return Err(DistillError::NoSentences);
    }

    if available <= policy.min_sentences {
        debug!(
            "Only {available} sentences (minimum {}), keeping text verbatim",
            policy.min_sentences
        );
        return Ok(ExtractiveSummary {
            text: cleaned.to_string(),
            outcome: ExtractiveOutcome::TooFewSentences,
            original_length,
            available_sentences: available,
            selected_sentences: available,
        });
    }

    let table = WordFrequencyTable::build(cleaned);
    let scored = scoring::score_sentences(&sentences, &table, category);
    let selected = selection::select(scored, original_length, policy);
    if selected.is_empty() {
        return Err(DistillError::EmptySelection);
    }

    debug!(
        "Selected {} of {available} sentences for {category} (vocabulary {})",
        selected.len(),
        table.len()
    );

    Ok(ExtractiveSummary {
        text: selection::reassemble(&selected),
        outcome: ExtractiveOutcome::Summarized,
        original_length,
        available_sentences: available,
        selected_sentences: selected.len(),
    })
}

/// Summarize `text` with the built-in policy for `category` and no provider
/// tier.
#[must_use]
pub fn summarize(text: &str, category: ContentCategory) -> String {
    crate::distiller::distill_locally(text, category, &CompressionPolicy::for_category(category))
        .text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(category: ContentCategory) -> CompressionPolicy {
        CompressionPolicy::for_category(category)
    }

    #[test]
    fn short_input_is_returned_unchanged() {
        let cleaned = "A short note. Nothing to trim here at all.";
        let Ok(summary) = extract(cleaned, ContentCategory::Blog, &policy(ContentCategory::Blog))
        else {
            panic!("short input should not fail");
        };
        assert_eq!(summary.outcome, ExtractiveOutcome::ShortInput);
        assert_eq!(summary.text, cleaned);
    }

    #[test]
    fn few_sentences_are_kept_verbatim() {
        let cleaned = format!(
            "{} {} {}",
            "The committee reviewed every proposal submitted during the spring session carefully.",
            "Members then debated the budget implications of each proposal for several hours.",
            "Finally the chair scheduled a vote on the three strongest proposals for next week."
        );
        let Ok(summary) = extract(&cleaned, ContentCategory::News, &policy(ContentCategory::News))
        else {
            panic!("verbatim path should not fail");
        };
        assert_eq!(summary.outcome, ExtractiveOutcome::TooFewSentences);
        assert_eq!(summary.text, cleaned);
        assert_eq!(summary.available_sentences, 3);
    }

    #[test]
    fn run_on_text_without_sentences_is_an_error() {
        let cleaned = "word ".repeat(80);
        let result = extract(
            cleaned.trim(),
            ContentCategory::Unknown,
            &policy(ContentCategory::Unknown),
        );
        assert!(matches!(result, Err(DistillError::NoSentences)));
    }

    #[test]
    fn long_input_is_compressed() {
        let cleaned = (0..12)
            .map(|i| format!("Sentence number {i} talks about river bridges and the council budget."))
            .collect::<Vec<_>>()
            .join(" ");
        let Ok(summary) = extract(
            &cleaned,
            ContentCategory::Unknown,
            &policy(ContentCategory::Unknown),
        ) else {
            panic!("long input should summarize");
        };
        assert_eq!(summary.outcome, ExtractiveOutcome::Summarized);
        assert!(summary.selected_sentences >= 3);
        assert!(summary.selected_sentences <= 8);
        assert!(summary.text.chars().count() < cleaned.chars().count());
    }
}
