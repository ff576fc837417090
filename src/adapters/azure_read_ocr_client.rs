use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::core::interfaces::adapters::ReadOcrApi;
use crate::core::models::{ReadOperation, ReadSubmission};
use crate::global_constants;

/// Azure Computer Vision "Read" v3.2 client.
pub struct AzureReadOcrClient {
    http_client: reqwest::Client,
    endpoint: String,
    subscription_key: String,
}

impl AzureReadOcrClient {
    pub fn new(endpoint: impl Into<String>, subscription_key: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            subscription_key: subscription_key.into(),
        }
    }

    fn construct_analyze_url(&self) -> String {
        format!(
            "{}{}",
            self.endpoint.trim_end_matches('/'),
            global_constants::AZURE_READ_ANALYZE_PATH
        )
    }
}

#[async_trait]
impl ReadOcrApi for AzureReadOcrClient {
    async fn submit_image(&self, image_bytes: Vec<u8>) -> Result<ReadSubmission> {
        let analyze_url = self.construct_analyze_url();
        log::debug!("[AZURE_READ] POST {} ({} bytes)", analyze_url, image_bytes.len());

        let response = self
            .http_client
            .post(&analyze_url)
            .header(
                global_constants::AZURE_SUBSCRIPTION_KEY_HEADER,
                &self.subscription_key,
            )
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image_bytes)
            .send()
            .await
            .with_context(|| format!("Azure read request to {} failed", analyze_url))?;

        let status = response.status().as_u16();
        let operation_location = response
            .headers()
            .get(global_constants::AZURE_OPERATION_LOCATION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let body = response
            .text()
            .await
            .context("Failed to read Azure read response body")?;

        log::debug!(
            "[AZURE_READ] Submission status {}, operation location {:?}",
            status,
            operation_location
        );

        Ok(ReadSubmission {
            status,
            operation_location,
            body,
        })
    }

    async fn fetch_operation(&self, operation_location: &str) -> Result<ReadOperation> {
        let response_text = self
            .http_client
            .get(operation_location)
            .header(
                global_constants::AZURE_SUBSCRIPTION_KEY_HEADER,
                &self.subscription_key,
            )
            .send()
            .await
            .context("Azure read status request failed")?
            .text()
            .await
            .context("Failed to read Azure read status body")?;

        log::debug!("[AZURE_READ] Operation response: {}", response_text);

        serde_json::from_str(&response_text)
            .with_context(|| format!("Failed to decode Azure read status JSON: {response_text}"))
    }
}
