use async_trait::async_trait;
use distill_core::{ChatMessage, LLMProvider, LLMResponse, Usage};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

use crate::retry::{RetryPolicy, retry_with_backoff};

pub const DEFAULT_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";
pub const DEFAULT_MODEL: &str = "glm-4-flash";

pub struct ZhipuProvider {
    client: Client,
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
}

impl ZhipuProvider {
    #[must_use]
    pub fn new(api_key: String) -> Self {
        info!("Creating ZhipuProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn parse_response(response: &serde_json::Value) -> anyhow::Result<LLMResponse> {
        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
            .to_string();

        let count = |u: &serde_json::Map<String, serde_json::Value>, key: &str| {
            u32::try_from(u.get(key).and_then(serde_json::Value::as_u64).unwrap_or(0))
                .unwrap_or(0)
        };
        let usage = response["usage"].as_object().map(|u| Usage {
            prompt_tokens: count(u, "prompt_tokens"),
            completion_tokens: count(u, "completion_tokens"),
            total_tokens: count(u, "total_tokens"),
        });

        Ok(LLMResponse { content, usage })
    }

    /// Helper method to send a single request
    async fn try_send(&self, request: &serde_json::Value) -> anyhow::Result<LLMResponse> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        Self::parse_response(&response)
    }
}

#[async_trait]
impl LLMProvider for ZhipuProvider {
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse> {
        let request = json!({
            "model": model,
            "messages": messages,
        });

        debug!("Sending request to Zhipu API: model={model}");
        let response = retry_with_backoff(|| self.try_send(&request), &self.retry).await?;
        if let Some(usage) = &response.usage {
            debug!(
                "Zhipu usage: {} prompt + {} completion = {} tokens",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }
        Ok(response)
    }

    fn get_default_model(&self) -> &'static str {
        DEFAULT_MODEL
    }
}
