use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::interfaces::adapters::{ChatCompletionApi, ChatCompletionRequest};

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible `/chat/completions` client.
pub struct OpenAiChatClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiChatClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn construct_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_payload(&self, request: &ChatCompletionRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": request.user_message }
            ],
            "temperature": request.temperature
        })
    }
}

fn extract_first_choice_content(response_text: &str) -> Result<String> {
    let response: ChatCompletionResponse = serde_json::from_str(response_text)
        .with_context(|| format!("Failed to decode OpenAI response JSON: {response_text}"))?;

    let first_choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("No choices returned from OpenAI"))?;

    Ok(first_choice.message.content.unwrap_or_default())
}

#[async_trait]
impl ChatCompletionApi for OpenAiChatClient {
    async fn complete(&self, request: ChatCompletionRequest) -> Result<String> {
        let url = self.construct_completions_url();
        let payload = self.build_payload(&request);

        log::info!("[OPENAI] Requesting completion from model {}", self.model);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("OpenAI request failed")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read OpenAI response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenAI chat completion failed: status {} body {}",
                status,
                response_text
            ));
        }

        extract_first_choice_content(&response_text)
    }
}
