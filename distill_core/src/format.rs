//! Digest layout for sequential readers.
//!
//! A sectioned digest looks like:
//!
//! ```text
//! [SECTION: News]
//! The council approved the budget on Monday. ...
//! [KEYWORDS: council, budget, bridge]
//! ```
//!
//! Both markers use the grammar [`crate::summarize::clean`] strips, so a
//! digest fed back through the pipeline loses its old markers.

use serde::{Deserialize, Serialize};

use crate::distiller::Distillation;
use crate::summarize::WordFrequencyTable;

/// Default number of keywords in the trailing annotation.
pub const DEFAULT_MAX_KEYWORDS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatStyle {
    /// Section marker, body, keyword line.
    #[default]
    Sectioned,
    /// Body only.
    Plain,
}

impl std::str::FromStr for FormatStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sectioned" => Ok(Self::Sectioned),
            "plain" => Ok(Self::Plain),
            _ => Err(anyhow::anyhow!("unknown format style: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestFormatter {
    style: FormatStyle,
    max_keywords: usize,
}

impl DigestFormatter {
    #[must_use]
    pub const fn new(style: FormatStyle) -> Self {
        Self {
            style,
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }

    #[must_use]
    pub const fn with_max_keywords(mut self, max_keywords: usize) -> Self {
        self.max_keywords = max_keywords;
        self
    }

    #[must_use]
    pub const fn style(&self) -> FormatStyle {
        self.style
    }

    /// Render a digest. Empty digests render as an empty string.
    #[must_use]
    pub fn format(&self, distillation: &Distillation) -> String {
        let body = distillation.text.trim();
        if body.is_empty() || self.style == FormatStyle::Plain {
            return body.to_string();
        }

        let mut out = format!("[SECTION: {}]\n{body}", distillation.category().label());
        let keywords = WordFrequencyTable::build(body).top_keywords(self.max_keywords);
        if !keywords.is_empty() {
            out.push_str("\n[KEYWORDS: ");
            out.push_str(&keywords.join(", "));
            out.push(']');
        }
        out
    }
}

impl Default for DigestFormatter {
    fn default() -> Self {
        Self::new(FormatStyle::Sectioned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContentCategory;
    use crate::diagnostics::{DistillReport, Tier};
    use crate::distiller::distill_locally;
    use crate::policy::CompressionPolicy;

    fn digest(category: ContentCategory, text: &str) -> Distillation {
        Distillation {
            text: text.to_string(),
            report: DistillReport::new(category, Tier::Extractive, 0.6),
        }
    }

    #[test]
    fn sectioned_layout() {
        let d = digest(
            ContentCategory::ECommerce,
            "The kettle costs twenty pounds. The kettle boils water fast.",
        );
        let out = DigestFormatter::default().format(&d);
        assert_eq!(
            out,
            "[SECTION: Shop]\nThe kettle costs twenty pounds. The kettle boils water fast.\n[KEYWORDS: kettle, boils, costs]"
        );
    }

    #[test]
    fn plain_layout_is_body_only() {
        let d = digest(ContentCategory::News, "Body text here.");
        assert_eq!(DigestFormatter::new(FormatStyle::Plain).format(&d), "Body text here.");
    }

    #[test]
    fn zero_keywords_omits_annotation() {
        let d = digest(ContentCategory::Blog, "Walking the dog today.");
        let out = DigestFormatter::default().with_max_keywords(0).format(&d);
        assert_eq!(out, "[SECTION: Blog]\nWalking the dog today.");
    }

    #[test]
    fn empty_digest_renders_empty() {
        let d = digest(ContentCategory::News, "");
        assert_eq!(DigestFormatter::default().format(&d), "");
    }

    #[test]
    fn refed_digest_does_not_accumulate_markers() {
        let formatter = DigestFormatter::default();
        let policy = CompressionPolicy::for_category(ContentCategory::News);
        let first = formatter.format(&digest(
            ContentCategory::News,
            "The council voted. The bridge closes.",
        ));
        let second = formatter.format(&distill_locally(&first, ContentCategory::News, &policy));
        assert_eq!(second.matches("[SECTION:").count(), 1);
        assert_eq!(second.matches("[KEYWORDS:").count(), 1);
        assert_eq!(first, second);
    }
}
