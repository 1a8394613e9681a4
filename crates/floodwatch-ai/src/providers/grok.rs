use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::models::{ChatMessage, ChatRequest, ChatResponse};
use crate::Assistant;

/// xAI chat-completions provider.
#[derive(Clone)]
pub struct GrokProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
}

impl GrokProvider {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
        max_tokens: Option<usize>,
        temperature: Option<f32>,
    ) -> Result<Self> {
        let timeout = timeout_secs.unwrap_or(120);
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout))
            .build()?;

        Ok(Self {
            api_key,
            model: model.unwrap_or_else(|| "grok-2-1212".to_string()),
            base_url: base_url.unwrap_or_else(|| "https://api.x.ai/v1".to_string()),
            client,
            max_tokens,
            temperature,
        })
    }
}

#[async_trait]
impl Assistant for GrokProvider {
    fn provider(&self) -> &str {
        "xai"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let req = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Calling xAI API"
        );

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&req)
            .send()
            .await
            .context("Failed to send request to xAI API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                "xAI API request failed"
            );
            anyhow::bail!("xAI API error {}: {}", status, body);
        }

        let chat_resp: ChatResponse = resp
            .json()
            .await
            .context("Failed to parse xAI API response")?;

        let answer = chat_resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .context("xAI API returned no choices")?;

        Ok(answer)
    }
}
