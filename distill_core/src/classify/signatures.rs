//! Category signature definitions.
//!
//! Signatures are plain regex sources so a deployment can swap them through
//! configuration; the built-in set is compiled once per process.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::ContentCategory;
use crate::error::Result;

/// A compiled signature for one category.
#[derive(Debug, Clone)]
pub struct CategorySignature {
    pub category: ContentCategory,
    pub pattern: Regex,
}

impl CategorySignature {
    /// Count non-overlapping matches in `text`.
    #[must_use]
    pub fn score(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }
}

/// Serializable signature source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureDef {
    pub category: ContentCategory,
    pub pattern: String,
}

impl SignatureDef {
    #[must_use]
    pub fn new(category: ContentCategory, pattern: impl Into<String>) -> Self {
        Self {
            category,
            pattern: pattern.into(),
        }
    }

    /// Compile into a [`CategorySignature`].
    ///
    /// # Errors
    /// Returns an error if the regex pattern is invalid.
    pub fn build(&self) -> Result<CategorySignature> {
        Ok(CategorySignature {
            category: self.category,
            pattern: Regex::new(&self.pattern)?,
        })
    }
}

/// Built-in signature sources, one per scored category.
#[must_use]
pub fn default_signature_defs() -> Vec<SignatureDef> {
    vec![
        SignatureDef::new(
            ContentCategory::News,
            r"(?i)\b(?:breaking|reported|reporters?|according to|said|says|announced|officials?|spokesperson|press release|correspondent|yesterday|on (?:monday|tuesday|wednesday|thursday|friday|saturday|sunday))\b",
        ),
        SignatureDef::new(
            ContentCategory::Article,
            r"(?i)\b(?:analysis|however|furthermore|moreover|in conclusion|research(?:ers)?|study|studies|essay|perspective|argues?)\b",
        ),
        SignatureDef::new(
            ContentCategory::Blog,
            r"(?i)\b(?:i think|i've|i'm|my (?:experience|thoughts|favorite|journey)|posted by|blog|personally|leave a comment|comments?)\b",
        ),
        SignatureDef::new(
            ContentCategory::Form,
            r"(?i)\b(?:required|submit|enter your|password|username|e-?mail address|sign up|log ?in|check ?box|drop-?down|mandatory field)\b",
        ),
        SignatureDef::new(
            ContentCategory::Navigation,
            r"(?i)\b(?:home|menu|sitemap|navigation|skip to (?:content|main)|next page|previous page|back to top|contact us|about us|privacy policy)\b",
        ),
        SignatureDef::new(
            ContentCategory::ECommerce,
            r"(?i)(?:[$€£]\s?\d|\b(?:price|add to (?:cart|basket)|buy now|in stock|out of stock|free shipping|checkout|discount|customer reviews?)\b)",
        ),
        SignatureDef::new(
            ContentCategory::Educational,
            r"(?i)\b(?:learn(?:ing)?|lesson|chapter|course|definition|is defined as|exercises?|students?|tutorial|theorem|quiz|for example)\b",
        ),
    ]
}

static DEFAULT_SIGNATURES: OnceLock<Vec<CategorySignature>> = OnceLock::new();

/// The compiled built-in signature table.
#[expect(
    clippy::expect_used,
    reason = "Static regex patterns validated at compile time"
)]
pub fn default_signatures() -> &'static [CategorySignature] {
    DEFAULT_SIGNATURES.get_or_init(|| {
        default_signature_defs()
            .iter()
            .map(|def| {
                def.build()
                    .expect("Static regex pattern is guaranteed to be valid")
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_compile_and_cover_scored_categories() {
        let signatures = default_signatures();
        assert_eq!(signatures.len(), 7);
        assert!(
            signatures
                .iter()
                .all(|s| s.category != ContentCategory::Unknown)
        );
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let def = SignatureDef::new(ContentCategory::Blog, "(unclosed");
        assert!(def.build().is_err());
    }

    #[test]
    fn score_counts_non_overlapping_matches() {
        let signature = SignatureDef::new(ContentCategory::News, r"(?i)\bsaid\b")
            .build()
            .ok();
        let Some(signature) = signature else {
            panic!("valid pattern rejected");
        };
        assert_eq!(signature.score("He said. She SAID. They said so."), 3);
    }

    #[test]
    fn price_signature_matches_currency_amounts() {
        let shop = default_signatures()
            .iter()
            .find(|s| s.category == ContentCategory::ECommerce);
        let Some(shop) = shop else {
            panic!("missing e-commerce signature");
        };
        assert_eq!(shop.score("Only $19.99, was €25. Add to cart now."), 3);
    }
}
