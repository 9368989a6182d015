use serde::{Deserialize, Serialize};

use crate::ContentCategory;

/// Which tier produced a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Empty input; nothing was attempted.
    Empty,
    Provider,
    Extractive,
    /// Input was short or had too few sentences and passed through verbatim.
    Passthrough,
    NaiveSplit,
}

impl Tier {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Provider => "provider",
            Self::Extractive => "extractive",
            Self::Passthrough => "passthrough",
            Self::NaiveSplit => "naive_split",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call statistics. Lengths are character counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistillReport {
    pub category: ContentCategory,
    pub tier: Tier,
    /// The hard cap cut the text.
    pub truncated: bool,
    /// Cleaned input length.
    pub original_length: usize,
    /// Length of the produced text before the hard cap.
    pub selected_length: usize,
    /// Length of the final digest.
    pub summary_length: usize,
    pub available_sentences: usize,
    pub selected_sentences: usize,
    pub expected_ratio: f64,
    /// `selected_length / original_length`.
    pub actual_ratio: f64,
    /// `actual_ratio / expected_ratio`.
    pub efficiency: f64,
}

impl DistillReport {
    #[must_use]
    pub fn new(category: ContentCategory, tier: Tier, expected_ratio: f64) -> Self {
        Self {
            category,
            tier,
            truncated: false,
            original_length: 0,
            selected_length: 0,
            summary_length: 0,
            available_sentences: 0,
            selected_sentences: 0,
            expected_ratio,
            actual_ratio: 0.0,
            efficiency: 0.0,
        }
    }

    /// Fill lengths and derived ratios.
    #[must_use]
    pub fn with_lengths(
        mut self,
        original_length: usize,
        selected_length: usize,
        summary_length: usize,
    ) -> Self {
        self.original_length = original_length;
        self.selected_length = selected_length;
        self.summary_length = summary_length;
        self.truncated = summary_length < selected_length;
        self.actual_ratio = ratio(selected_length, original_length);
        self.efficiency = if self.expected_ratio > 0.0 {
            self.actual_ratio / self.expected_ratio
        } else {
            0.0
        };
        self
    }

    #[must_use]
    pub const fn with_sentences(mut self, available: usize, selected: usize) -> Self {
        self.available_sentences = available;
        self.selected_sentences = selected;
        self
    }

    /// Ratio of the final, capped digest to the cleaned input.
    #[must_use]
    pub fn capped_ratio(&self) -> f64 {
        ratio(self.summary_length, self.original_length)
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "Character counts stay far below f64 mantissa range"
)]
fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
