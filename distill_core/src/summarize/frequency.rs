//! Document word-frequency table.

use std::collections::HashMap;

use super::stopwords::is_stopword;

/// Shortest token counted as a word, in characters.
pub const MIN_WORD_LEN: usize = 3;

/// Split text on non-letter boundaries and keep normalized content words:
/// lowercase, at least [`MIN_WORD_LEN`] characters, not a stopword.
pub fn content_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|token| token.chars().count() >= MIN_WORD_LEN)
        .map(str::to_lowercase)
        .filter(|word| !is_stopword(word))
}

/// Word relevance weights in `[0, 1]`, normalized by the most frequent word.
#[derive(Debug, Clone, Default)]
pub struct WordFrequencyTable {
    weights: HashMap<String, f64>,
}

impl WordFrequencyTable {
    /// Count content words in `text` and normalize by the maximum count.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "Word counts stay far below f64 mantissa range"
    )]
    pub fn build(text: &str) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in content_words(text) {
            *counts.entry(word).or_insert(0) += 1;
        }

        let max = counts.values().copied().max().unwrap_or(0);
        if max == 0 {
            return Self::default();
        }

        let weights = counts
            .into_iter()
            .map(|(word, count)| (word, count as f64 / max as f64))
            .collect();
        Self { weights }
    }

    /// Weight of a normalized word, 0 when absent.
    #[must_use]
    pub fn weight(&self, word: &str) -> f64 {
        self.weights.get(word).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The `n` heaviest words, ties broken alphabetically.
    #[must_use]
    pub fn top_keywords(&self, n: usize) -> Vec<String> {
        let mut entries: Vec<(&String, f64)> =
            self.weights.iter().map(|(w, &weight)| (w, weight)).collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
            .into_iter()
            .take(n)
            .map(|(word, _)| word.clone())
            .collect()
    }
}
