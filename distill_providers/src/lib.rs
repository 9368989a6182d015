#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Concrete summary providers and their registration.

pub mod retry;
pub mod textrank;
pub mod zhipu;

pub use retry::{RetryPolicy, retry_with_backoff};
pub use textrank::TextRankProvider;
pub use zhipu::ZhipuProvider;

use distill_core::{LlmSummaryProvider, ProviderKind, ProviderRegistry, SummaryProvider};
use serde::{Deserialize, Serialize};

/// Connection settings for the Zhipu-backed provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZhipuSettings {
    pub api_key: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

fn build_zhipu(settings: &ZhipuSettings) -> anyhow::Result<Box<dyn SummaryProvider>> {
    if settings.api_key.trim().is_empty() {
        anyhow::bail!("Zhipu API key not configured");
    }
    let mut client = ZhipuProvider::new(settings.api_key.clone());
    if let Some(base_url) = &settings.base_url {
        client = client.with_base_url(base_url.clone());
    }
    let mut provider = LlmSummaryProvider::new(client);
    if let Some(model) = &settings.model {
        provider = provider.with_model(model.clone());
    }
    Ok(Box::new(provider))
}

/// Register every built-in provider. `TextRank` needs nothing; Zhipu is
/// registered either way and fails at activation without an API key.
pub fn register_builtin(registry: &mut ProviderRegistry, zhipu: ZhipuSettings) {
    registry.register(
        ProviderKind::TextRank,
        Box::new(|| -> anyhow::Result<Box<dyn SummaryProvider>> {
            Ok(Box::new(TextRankProvider::new()))
        }),
    );
    registry.register(ProviderKind::Zhipu, Box::new(move || build_zhipu(&zhipu)));
}
