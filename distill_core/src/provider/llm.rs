use async_trait::async_trait;
use tracing::debug;

use super::{ProviderCapabilities, ProviderDescriptor, SummaryProvider};
use crate::{ChatMessage, LLMProvider, Role};

/// Build the user prompt asking for a summary of `text`.
#[must_use]
pub fn build_summary_prompt(text: &str, target_sentences: usize) -> String {
    let unit = if target_sentences == 1 {
        "sentence"
    } else {
        "sentences"
    };
    format!(
        r"# Task
Summarize the page text below.

# Page Text
{text}

# Requirements
- At most {target_sentences} {unit}
- Plain prose, no lists or headings
- Output only the summary
"
    )
}

/// Default system prompt for page summarization
const DEFAULT_SUMMARY_SYSTEM_PROMPT: &str = r"
# Task
You are a page summarization expert. Condense web page text into a short digest for a reader who will not see the page.

# Rules
1. Keep the facts that matter most: who, what, prices, dates, required actions
2. Never invent information absent from the text
3. Output ONLY the summary sentences
";

const PROBE_PROMPT: &str = "Reply with OK.";

/// Summary provider backed by a chat-completions model.
pub struct LlmSummaryProvider<P>
where
    P: LLMProvider + Send + Sync,
{
    provider: P,
    model: String,
    system_prompt: String,
    ready: bool,
}

impl<P> LlmSummaryProvider<P>
where
    P: LLMProvider + Send + Sync,
{
    #[must_use]
    pub fn new(provider: P) -> Self {
        let model = provider.get_default_model().to_string();
        Self {
            provider,
            model,
            system_prompt: DEFAULT_SUMMARY_SYSTEM_PROMPT.to_string(),
            ready: false,
        }
    }

    /// Set the model to use for summaries
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Set a custom system prompt
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: String) -> Self {
        self.system_prompt = prompt;
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl<P> SummaryProvider for LlmSummaryProvider<P>
where
    P: LLMProvider + Send + Sync,
{
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor {
            name: format!("llm:{}", self.model),
            version: env!("CARGO_PKG_VERSION").to_string(),
            capabilities: ProviderCapabilities {
                gpu: false,
                network: true,
            },
        }
    }

    async fn initialize(&mut self) -> anyhow::Result<()> {
        let probe = [ChatMessage {
            role: Role::User,
            content: PROBE_PROMPT.to_string(),
        }];
        self.provider.chat(&probe, &self.model).await?;
        debug!("Model {} answered probe", self.model);
        self.ready = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn summarize(&self, text: &str, target_sentences: usize) -> anyhow::Result<String> {
        let messages = vec![
            ChatMessage {
                role: Role::System,
                content: self.system_prompt.clone(),
            },
            ChatMessage {
                role: Role::User,
                content: build_summary_prompt(text, target_sentences),
            },
        ];

        let response = self.provider.chat(&messages, &self.model).await?;
        debug!(
            "Summary response from {}: {} chars",
            self.model,
            response.content.len()
        );

        let summary = response.content.trim();
        if summary.is_empty() {
            anyhow::bail!("model {} returned an empty summary", self.model);
        }
        Ok(summary.to_string())
    }

    async fn cleanup(&mut self) {
        self.ready = false;
    }
}
