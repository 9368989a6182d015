//! The distillation pipeline: classify, pick a tier, cap.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::ContentCategory;
use crate::classify::ContentClassifier;
use crate::diagnostics::{DistillReport, Tier};
use crate::error::{DistillError, Result};
use crate::policy::{CompressionPolicy, PolicyTable};
use crate::provider::{ProviderKind, ProviderRegistry};
use crate::summarize::{
    self, ExtractiveOutcome, NAIVE_SENTENCE_LIMIT, SHORT_TEXT_THRESHOLD, clean, hard_cap,
    naive_pieces,
};

/// Default bound on a single provider call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Text handed over by the page-to-text step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub text: String,
    /// Extraction failed upstream; there is nothing to distill.
    #[serde(default)]
    pub extraction_failed: bool,
}

impl PageText {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extraction_failed: false,
        }
    }

    #[must_use]
    pub fn failed() -> Self {
        Self {
            text: String::new(),
            extraction_failed: true,
        }
    }
}

/// A capped digest with the statistics that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distillation {
    pub text: String,
    pub report: DistillReport,
}

impl Distillation {
    #[must_use]
    pub const fn category(&self) -> ContentCategory {
        self.report.category
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Run tiers 2 to 4 (extractive, naive split, hard cap) with no provider.
#[must_use]
pub fn distill_locally(
    text: &str,
    category: ContentCategory,
    policy: &CompressionPolicy,
) -> Distillation {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return Distillation {
            text: String::new(),
            report: DistillReport::new(category, Tier::Empty, policy.target_ratio),
        };
    }
    let original_length = char_len(&cleaned);

    let (body, tier, available, selected) = match summarize::extract(&cleaned, category, policy)
    {
        Ok(summary) => {
            let tier = match summary.outcome {
                ExtractiveOutcome::Summarized => Tier::Extractive,
                ExtractiveOutcome::ShortInput | ExtractiveOutcome::TooFewSentences => {
                    Tier::Passthrough
                }
            };
            (
                summary.text,
                tier,
                summary.available_sentences,
                summary.selected_sentences,
            )
        }
        Err(e) => {
            debug!("Extractive tier unavailable ({e}), using naive split");
            let pieces = naive_pieces(&cleaned, NAIVE_SENTENCE_LIMIT);
            if pieces.is_empty() {
                (cleaned.clone(), Tier::NaiveSplit, 0, 0)
            } else {
                (pieces.join(" "), Tier::NaiveSplit, 0, pieces.len())
            }
        }
    };

    let capped = hard_cap(&body, policy.char_cap);
    debug!(
        "{category}: {tier} tier, {original_length} -> {} chars",
        char_len(&capped)
    );
    let report = DistillReport::new(category, tier, policy.target_ratio)
        .with_lengths(original_length, char_len(&body), char_len(&capped))
        .with_sentences(available, selected);
    Distillation {
        text: capped,
        report,
    }
}

/// Classifier, policy table and provider registry wired together.
///
/// Built once by the caller and shared; every method takes `&self`.
pub struct Distiller {
    classifier: ContentClassifier,
    policies: PolicyTable,
    registry: Arc<RwLock<ProviderRegistry>>,
    provider_enabled: bool,
    call_timeout: Duration,
}

impl Distiller {
    /// A distiller with built-in signatures and policies and an empty
    /// registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            classifier: ContentClassifier::with_defaults(),
            policies: PolicyTable::new(),
            registry: Arc::new(RwLock::new(ProviderRegistry::new())),
            provider_enabled: true,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: ContentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn with_policies(mut self, policies: PolicyTable) -> Self {
        self.policies = policies;
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = Arc::new(RwLock::new(registry));
        self
    }

    /// Enable or disable the provider tier.
    #[must_use]
    pub const fn with_provider_enabled(mut self, enabled: bool) -> Self {
        self.provider_enabled = enabled;
        self
    }

    #[must_use]
    pub const fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    #[must_use]
    pub const fn provider_enabled(&self) -> bool {
        self.provider_enabled
    }

    #[must_use]
    pub const fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    /// Shared handle to the provider registry.
    #[must_use]
    pub fn registry(&self) -> Arc<RwLock<ProviderRegistry>> {
        Arc::clone(&self.registry)
    }

    #[must_use]
    pub fn classify(&self, text: &str) -> ContentCategory {
        self.classifier.classify(text)
    }

    #[must_use]
    pub fn policy(&self, category: ContentCategory) -> CompressionPolicy {
        self.policies.get(category)
    }

    /// Select a provider. Waits for in-flight summarizations to finish.
    ///
    /// # Errors
    /// See [`ProviderRegistry::activate`].
    pub async fn activate_provider(&self, kind: ProviderKind) -> Result<()> {
        self.registry.write().await.activate(kind).await
    }

    pub async fn deactivate_provider(&self) {
        self.registry.write().await.deactivate().await;
    }

    /// Summarize without the provider tier.
    #[must_use]
    pub fn summarize_extractive(&self, text: &str, category: ContentCategory) -> Distillation {
        distill_locally(text, category, &self.policies.get(category))
    }

    /// Summarize `text` as `category`. Never fails; the result respects the
    /// category's character cap.
    pub async fn summarize(&self, text: &str, category: ContentCategory) -> Distillation {
        let policy = self.policies.get(category);
        if self.provider_enabled {
            if let Some(distillation) = self.try_provider(text, category, &policy).await {
                return distillation;
            }
        }
        distill_locally(text, category, &policy)
    }

    /// Classify then summarize.
    pub async fn distill(&self, text: &str) -> Distillation {
        let category = self.classify(text);
        self.summarize(text, category).await
    }

    /// Distill a page, or `None` when upstream extraction failed.
    pub async fn process(&self, page: &PageText) -> Option<Distillation> {
        if page.extraction_failed {
            debug!("Skipping page: extraction failed");
            return None;
        }
        Some(self.distill(&page.text).await)
    }

    async fn try_provider(
        &self,
        text: &str,
        category: ContentCategory,
        policy: &CompressionPolicy,
    ) -> Option<Distillation> {
        let cleaned = clean(text);
        let original_length = char_len(&cleaned);
        if original_length < SHORT_TEXT_THRESHOLD {
            return None;
        }

        let registry = self.registry.read().await;
        let provider = registry.active()?;
        let name = provider.descriptor().name;

        let outcome = tokio::time::timeout(
            self.call_timeout,
            provider.summarize(&cleaned, policy.provider_sentences),
        )
        .await;
        let summary = match outcome {
            Ok(Ok(summary)) => clean(&summary),
            Ok(Err(source)) => {
                registry.report_failure(&DistillError::ProviderFailed { name, source });
                return None;
            }
            Err(_) => {
                registry.report_failure(&DistillError::ProviderTimeout {
                    name,
                    timeout: self.call_timeout,
                });
                return None;
            }
        };
        if summary.is_empty() {
            registry.report_failure(&DistillError::ProviderFailed {
                name,
                source: anyhow::anyhow!("empty summary"),
            });
            return None;
        }

        let capped = hard_cap(&summary, policy.char_cap);
        debug!(
            "{category}: provider {name}, {original_length} -> {} chars",
            char_len(&capped)
        );
        let report = DistillReport::new(category, Tier::Provider, policy.target_ratio)
            .with_lengths(original_length, char_len(&summary), char_len(&capped))
            .with_sentences(
                summarize::segment(&cleaned).len(),
                summarize::split_sentences(&summary).len(),
            );
        Some(Distillation {
            text: capped,
            report,
        })
    }
}

impl Default for Distiller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_news() -> String {
        let lead = "The city council announced on Monday that the river bridge will close for repairs.";
        let rest = (0..10)
            .map(|i| format!("Residents in district {i} described the detour plans as confusing and slow."))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{lead} {rest}")
    }

    #[test]
    fn empty_input_yields_empty_digest() {
        let d = distill_locally("", ContentCategory::News, &CompressionPolicy::for_category(ContentCategory::News));
        assert_eq!(d.text, "");
        assert_eq!(d.report.tier, Tier::Empty);

        let markers_only = distill_locally(
            "[SECTION: Top] [IMAGE: logo]",
            ContentCategory::Unknown,
            &CompressionPolicy::for_category(ContentCategory::Unknown),
        );
        assert_eq!(markers_only.text, "");
    }

    #[test]
    fn short_input_passes_through_cleaned() {
        let text = "  Hello   there. [LINK: /home] Short page. ";
        let d = distill_locally(text, ContentCategory::Blog, &CompressionPolicy::for_category(ContentCategory::Blog));
        assert_eq!(d.text, clean(text));
        assert_eq!(d.report.tier, Tier::Passthrough);
    }

    #[test]
    fn run_on_text_falls_to_naive_split_and_cap() {
        let text = "word ".repeat(200);
        let policy = CompressionPolicy::for_category(ContentCategory::Navigation);
        let d = distill_locally(&text, ContentCategory::Navigation, &policy);
        assert_eq!(d.report.tier, Tier::NaiveSplit);
        assert!(d.report.truncated);
        assert!(d.text.chars().count() <= policy.char_cap);
        assert!(d.text.ends_with("..."));
    }

    #[test]
    fn long_news_is_extracted() {
        let text = long_news();
        let policy = CompressionPolicy::for_category(ContentCategory::News);
        let d = distill_locally(&text, ContentCategory::News, &policy);
        assert_eq!(d.report.tier, Tier::Extractive);
        assert!(d.text.chars().count() <= policy.char_cap);
        assert!(d.report.selected_sentences >= policy.min_sentences);
    }

    #[tokio::test]
    async fn failed_extraction_is_skipped() {
        let distiller = Distiller::new();
        assert!(distiller.process(&PageText::failed()).await.is_none());
        assert!(distiller.process(&PageText::new("Some text.")).await.is_some());
    }

    #[tokio::test]
    async fn empty_registry_uses_extractive_tier() {
        let distiller = Distiller::new();
        let text = long_news();
        let d = distiller.summarize(&text, ContentCategory::News).await;
        assert_eq!(d, distiller.summarize_extractive(&text, ContentCategory::News));
    }

    #[tokio::test]
    async fn policy_overrides_apply() {
        let Ok(policies) = PolicyTable::new().with_override(
            ContentCategory::News,
            CompressionPolicy::new(0.5, 1, 2, 120, 1),
        ) else {
            panic!("override should validate");
        };
        let distiller = Distiller::new().with_policies(policies);
        let d = distiller.summarize(&long_news(), ContentCategory::News).await;
        assert!(d.text.chars().count() <= 120);
        assert!(d.report.selected_sentences <= 2);
    }
}
