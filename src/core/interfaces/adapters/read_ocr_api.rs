use anyhow::Result;
use async_trait::async_trait;

use crate::core::models::{ReadOperation, ReadSubmission};

#[async_trait]
pub trait ReadOcrApi: Send + Sync {
    /// Uploads raw image bytes and starts an asynchronous read job.
    async fn submit_image(&self, image_bytes: Vec<u8>) -> Result<ReadSubmission>;

    async fn fetch_operation(&self, operation_location: &str) -> Result<ReadOperation>;
}
