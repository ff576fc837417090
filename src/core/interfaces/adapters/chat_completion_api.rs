use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub user_message: String,
    pub temperature: f32,
}

#[async_trait]
pub trait ChatCompletionApi: Send + Sync {
    /// Returns the first choice's message content.
    async fn complete(&self, request: ChatCompletionRequest) -> Result<String>;
}
