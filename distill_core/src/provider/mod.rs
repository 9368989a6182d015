//! Optional advanced summarizers.
//!
//! A provider is anything that can turn page text into a handful of
//! sentences better than the extractive tier: a local graph ranker, a remote
//! language model, and so on. Providers are registered as factories keyed by
//! [`ProviderKind`]; which one runs is configuration, never discovery.

mod llm;
mod registry;

pub use llm::{LlmSummaryProvider, build_summary_prompt};
pub use registry::{DEFAULT_INIT_TIMEOUT, ProviderFactory, ProviderRegistry};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identity of a provider implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Local graph-based sentence ranking.
    TextRank,
    /// Zhipu chat-completions model.
    Zhipu,
}

impl ProviderKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TextRank => "text_rank",
            Self::Zhipu => "zhipu",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "text_rank" | "textrank" => Ok(Self::TextRank),
            "zhipu" => Ok(Self::Zhipu),
            _ => Err(anyhow::anyhow!("unknown provider kind: {s}")),
        }
    }
}

/// What a provider needs from its host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    pub gpu: bool,
    pub network: bool,
}

/// Static description of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    pub name: String,
    pub version: String,
    pub capabilities: ProviderCapabilities,
}

/// Lifecycle of a provider instance inside a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderState {
    Uninitialized,
    Ready,
    /// Initialization failed once; never retried.
    PermanentlyUnavailable,
}

/// An advanced summarizer.
///
/// `summarize` is only called on an instance whose `is_ready` returns true;
/// the distiller checks before calling.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    fn descriptor(&self) -> ProviderDescriptor;

    /// Load whatever the provider needs. May block on I/O; the registry
    /// bounds it with a timeout.
    async fn initialize(&mut self) -> anyhow::Result<()>;

    fn is_ready(&self) -> bool;

    /// Summarize `text` into at most `target_sentences` sentences.
    async fn summarize(&self, text: &str, target_sentences: usize) -> anyhow::Result<String>;

    /// Release resources. The instance returns to the uninitialized state.
    async fn cleanup(&mut self);
}
