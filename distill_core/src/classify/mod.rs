//! Bag-of-patterns content classification.
//!
//! Every category signature is run over the raw page text and the category
//! with the strictly highest match count wins. Ties go to the category that
//! comes first in canonical order, and a page nothing matches is
//! [`ContentCategory::Unknown`]. The classifier gates every downstream budget
//! decision, so it stays a handful of regex scans rather than a model.

mod signatures;

pub use signatures::{CategorySignature, SignatureDef, default_signature_defs, default_signatures};

use std::sync::OnceLock;
use tracing::debug;

use crate::ContentCategory;
use crate::error::Result;

/// Match counts per category, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScores {
    counts: [usize; ContentCategory::COUNT],
}

impl CategoryScores {
    #[must_use]
    pub const fn get(&self, category: ContentCategory) -> usize {
        self.counts[category.index()]
    }

    /// Non-zero scores in canonical order.
    #[must_use]
    pub fn matched(&self) -> Vec<(ContentCategory, usize)> {
        ContentCategory::ALL
            .iter()
            .map(|&c| (c, self.get(c)))
            .filter(|&(_, count)| count > 0)
            .collect()
    }

    /// Winning category: strictly highest count, earliest on ties, `Unknown`
    /// when everything is zero.
    #[must_use]
    pub fn winner(&self) -> ContentCategory {
        let mut best = ContentCategory::Unknown;
        let mut best_count = 0;
        for category in ContentCategory::ALL {
            let count = self.get(category);
            if count > best_count {
                best = category;
                best_count = count;
            }
        }
        best
    }
}

/// Classifier over a fixed signature table.
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    signatures: Vec<CategorySignature>,
}

impl ContentClassifier {
    /// Create a classifier from compiled signatures.
    ///
    /// Several signatures for one category add up.
    #[must_use]
    pub fn new(mut signatures: Vec<CategorySignature>) -> Self {
        signatures.sort_by_key(|s| s.category.index());
        Self { signatures }
    }

    /// Create classifier with the built-in signatures.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(default_signatures().to_vec())
    }

    /// Compile a classifier from signature definitions.
    pub fn from_defs(defs: &[SignatureDef]) -> Result<Self> {
        let signatures = defs
            .iter()
            .map(SignatureDef::build)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(signatures))
    }

    /// Per-category match counts for `text`.
    #[must_use]
    pub fn scores(&self, text: &str) -> CategoryScores {
        let mut counts = [0; ContentCategory::COUNT];
        if text.trim().is_empty() {
            return CategoryScores { counts };
        }
        for signature in &self.signatures {
            counts[signature.category.index()] += signature.score(text);
        }
        CategoryScores { counts }
    }

    /// Classify `text` into a single category.
    #[must_use]
    pub fn classify(&self, text: &str) -> ContentCategory {
        let scores = self.scores(text);
        let category = scores.winner();
        debug!("Classified text as {category}: {:?}", scores.matched());
        category
    }

    #[must_use]
    pub fn signatures(&self) -> &[CategorySignature] {
        &self.signatures
    }
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

static DEFAULT_CLASSIFIER: OnceLock<ContentClassifier> = OnceLock::new();

/// Classify with the built-in signature table.
#[must_use]
pub fn classify(text: &str) -> ContentCategory {
    DEFAULT_CLASSIFIER
        .get_or_init(ContentClassifier::with_defaults)
        .classify(text)
}
