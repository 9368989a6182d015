//! Per-category compression budgets.
//!
//! A [`CompressionPolicy`] is the single place adaptivity is declared: how much
//! of a page to keep (`target_ratio`), how many sentences at least and at most,
//! and the hard character ceiling the output channel can afford. The defaults
//! below are static data; callers override them per category through a
//! [`PolicyTable`], the algorithm never mutates them.
//!
//! | category    | ratio | min | max | cap |
//! |-------------|-------|-----|-----|-----|
//! | news        | 0.55  | 4   | 8   | 400 |
//! | article     | 0.65  | 5   | 12  | 500 |
//! | blog        | 0.60  | 3   | 8   | 400 |
//! | form        | 0.90  | 5   | 12  | 200 |
//! | navigation  | 0.40  | 2   | 5   | 200 |
//! | e_commerce  | 0.75  | 4   | 10  | 300 |
//! | educational | 0.70  | 6   | 15  | 600 |
//! | other       | 0.60  | 3   | 8   | 400 |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ContentCategory;
use crate::error::{DistillError, Result};

/// Smallest char cap that still leaves room for an ellipsis marker.
pub const MIN_CHAR_CAP: usize = 4;

/// Upper bound on the sentence budget handed to an advanced provider.
pub const MAX_PROVIDER_SENTENCES: usize = 3;

/// Compression parameters for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompressionPolicy {
    /// Summary length / original length the selection aims for.
    pub target_ratio: f64,

    /// Sentences kept even when the length budget is exhausted.
    pub min_sentences: usize,

    /// Hard ceiling on selected sentences.
    pub max_sentences: usize,

    /// Hard ceiling on output characters.
    pub char_cap: usize,

    /// Sentence budget requested from an advanced provider.
    #[serde(default = "default_provider_sentences")]
    pub provider_sentences: usize,
}

const fn default_provider_sentences() -> usize {
    2
}

impl Default for CompressionPolicy {
    fn default() -> Self {
        Self {
            target_ratio: 0.60,
            min_sentences: 3,
            max_sentences: 8,
            char_cap: 400,
            provider_sentences: 2,
        }
    }
}

impl CompressionPolicy {
    #[must_use]
    pub const fn new(
        target_ratio: f64,
        min_sentences: usize,
        max_sentences: usize,
        char_cap: usize,
        provider_sentences: usize,
    ) -> Self {
        Self {
            target_ratio,
            min_sentences,
            max_sentences,
            char_cap,
            provider_sentences,
        }
    }

    /// Built-in policy for a category.
    #[must_use]
    pub const fn for_category(category: ContentCategory) -> Self {
        match category {
            ContentCategory::News => Self::new(0.55, 4, 8, 400, 2),
            ContentCategory::Article => Self::new(0.65, 5, 12, 500, 3),
            ContentCategory::Form => Self::new(0.90, 5, 12, 200, 1),
            ContentCategory::Navigation => Self::new(0.40, 2, 5, 200, 1),
            ContentCategory::ECommerce => Self::new(0.75, 4, 10, 300, 2),
            ContentCategory::Educational => Self::new(0.70, 6, 15, 600, 3),
            ContentCategory::Blog | ContentCategory::Unknown => Self::new(0.60, 3, 8, 400, 2),
        }
    }

    /// Check the invariants the selection algorithm relies on.
    pub fn validate(&self) -> Result<()> {
        if !(self.target_ratio > 0.0 && self.target_ratio <= 1.0) {
            return Err(DistillError::InvalidPolicy(format!(
                "target_ratio must be in (0, 1], got {}",
                self.target_ratio
            )));
        }
        if self.min_sentences == 0 || self.min_sentences > self.max_sentences {
            return Err(DistillError::InvalidPolicy(format!(
                "sentence bounds must satisfy 1 <= min <= max, got {}..={}",
                self.min_sentences, self.max_sentences
            )));
        }
        if self.char_cap < MIN_CHAR_CAP {
            return Err(DistillError::InvalidPolicy(format!(
                "char_cap must be at least {MIN_CHAR_CAP}, got {}",
                self.char_cap
            )));
        }
        if self.provider_sentences == 0 || self.provider_sentences > MAX_PROVIDER_SENTENCES {
            return Err(DistillError::InvalidPolicy(format!(
                "provider_sentences must be in 1..={MAX_PROVIDER_SENTENCES}, got {}",
                self.provider_sentences
            )));
        }
        Ok(())
    }
}

/// Built-in policies plus caller overrides.
///
/// Serialized as the bare override map; deserialization validates every
/// entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<ContentCategory, CompressionPolicy>",
    into = "BTreeMap<ContentCategory, CompressionPolicy>"
)]
pub struct PolicyTable {
    overrides: BTreeMap<ContentCategory, CompressionPolicy>,
}

impl TryFrom<BTreeMap<ContentCategory, CompressionPolicy>> for PolicyTable {
    type Error = DistillError;

    fn try_from(overrides: BTreeMap<ContentCategory, CompressionPolicy>) -> Result<Self> {
        Self::from_overrides(overrides)
    }
}

impl From<PolicyTable> for BTreeMap<ContentCategory, CompressionPolicy> {
    fn from(table: PolicyTable) -> Self {
        table.overrides
    }
}

impl PolicyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the policy for one category.
    pub fn with_override(
        mut self,
        category: ContentCategory,
        policy: CompressionPolicy,
    ) -> Result<Self> {
        policy.validate()?;
        self.overrides.insert(category, policy);
        Ok(self)
    }

    /// Build a table from a map of overrides, validating each entry.
    pub fn from_overrides(
        overrides: impl IntoIterator<Item = (ContentCategory, CompressionPolicy)>,
    ) -> Result<Self> {
        overrides
            .into_iter()
            .try_fold(Self::new(), |table, (category, policy)| {
                table.with_override(category, policy)
            })
    }

    /// Effective policy for a category.
    #[must_use]
    pub fn get(&self, category: ContentCategory) -> CompressionPolicy {
        self.overrides
            .get(&category)
            .copied()
            .unwrap_or_else(|| CompressionPolicy::for_category(category))
    }

    #[must_use]
    pub fn is_overridden(&self, category: ContentCategory) -> bool {
        self.overrides.contains_key(&category)
    }
}
