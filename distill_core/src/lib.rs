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

//! Adaptive content distillation: classify page text, then compress it into
//! a digest bounded by a per-category character cap.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod category;
pub mod classify;
pub mod diagnostics;
pub mod distiller;
pub mod error;
pub mod format;
pub mod policy;
pub mod provider;
pub mod summarize;

pub use category::ContentCategory;
pub use classify::{CategoryScores, ContentClassifier, SignatureDef, classify};
pub use diagnostics::{DistillReport, Tier};
pub use distiller::{DEFAULT_CALL_TIMEOUT, Distillation, Distiller, PageText, distill_locally};
pub use error::{DistillError, Result};
pub use format::{DigestFormatter, FormatStyle};
pub use policy::{CompressionPolicy, PolicyTable};
pub use provider::{
    LlmSummaryProvider, ProviderCapabilities, ProviderDescriptor, ProviderFactory, ProviderKind,
    ProviderRegistry, ProviderState, SummaryProvider,
};
pub use summarize::summarize;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Chat-completions backend used by [`LlmSummaryProvider`].
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse>;
    fn get_default_model(&self) -> &str;
}
