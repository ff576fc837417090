use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::interfaces::adapters::ReadOcrApi;
use crate::core::models::{
    ExtractedText, PipelineError, PollPolicy, ReadOperation, ReadOperationStatus,
};
use crate::global_constants;
use crate::utils;

/// Uploads a prescription image to the read service, waits for the job and
/// saves the recognized text next to the other outputs.
pub struct HandwritingExtractor {
    ocr_api: Arc<dyn ReadOcrApi>,
    poll_policy: PollPolicy,
    output_directory: PathBuf,
}

impl HandwritingExtractor {
    pub fn build(
        ocr_api: Arc<dyn ReadOcrApi>,
        poll_policy: PollPolicy,
        output_directory: PathBuf,
    ) -> Self {
        Self {
            ocr_api,
            poll_policy,
            output_directory,
        }
    }

    pub async fn extract(&self, image_path: &Path) -> Result<ExtractedText, PipelineError> {
        if !image_path.exists() {
            log::error!(
                "{} File '{}' not found.",
                global_constants::LOG_TAG_OCR,
                image_path.display()
            );
            return Err(PipelineError::FileNotFound(image_path.to_path_buf()));
        }

        let filename_stem = utils::extract_filename_stem(image_path);
        let image_bytes = tokio::fs::read(image_path).await?;

        log::info!(
            "{} Uploading image '{}' to Azure Read OCR...",
            global_constants::LOG_TAG_OCR,
            image_path.display()
        );

        let submission = self
            .ocr_api
            .submit_image(image_bytes)
            .await
            .map_err(PipelineError::Network)?;

        if submission.status != global_constants::AZURE_ACCEPTED_STATUS {
            log::error!(
                "{} API call failed: {}",
                global_constants::LOG_TAG_OCR,
                submission.status
            );
            log::error!("{} Response: {}", global_constants::LOG_TAG_OCR, submission.body);
            return Err(PipelineError::SubmissionRejected {
                status: submission.status,
                body: submission.body,
            });
        }

        let operation_location = submission.operation_location.ok_or_else(|| {
            PipelineError::MalformedResponse(format!(
                "accepted response carried no {} header",
                global_constants::AZURE_OPERATION_LOCATION_HEADER
            ))
        })?;

        log::info!("{} Processing OCR...", global_constants::LOG_TAG_OCR);
        let operation = self.wait_for_completion(&operation_location).await?;

        let text = operation.first_page_text().ok_or_else(|| {
            PipelineError::MalformedResponse("succeeded read operation had no pages".to_string())
        })?;

        let output_path = utils::build_output_path(
            &self.output_directory,
            &filename_stem,
            global_constants::TEXT_OUTPUT_EXTENSION,
        );
        utils::write_file_atomically(&output_path, text.as_bytes()).await?;

        log::info!(
            "{} Text extracted and saved to '{}'",
            global_constants::LOG_TAG_OCR,
            output_path.display()
        );

        Ok(ExtractedText {
            text,
            filename_stem,
        })
    }

    async fn wait_for_completion(
        &self,
        operation_location: &str,
    ) -> Result<ReadOperation, PipelineError> {
        let mut attempts_made = 0;

        while self.poll_policy.has_attempts_left(attempts_made) {
            attempts_made += 1;

            let operation = self
                .ocr_api
                .fetch_operation(operation_location)
                .await
                .map_err(PipelineError::Network)?;

            log::debug!(
                "{} Poll attempt {}: status {:?}",
                global_constants::LOG_TAG_OCR,
                attempts_made,
                operation.status
            );

            match operation.status {
                ReadOperationStatus::Succeeded => return Ok(operation),
                ReadOperationStatus::Failed => {
                    log::error!("{} OCR failed.", global_constants::LOG_TAG_OCR);
                    return Err(PipelineError::JobFailed);
                }
                _ => {}
            }

            if self.poll_policy.has_attempts_left(attempts_made) {
                tokio::time::sleep(self.poll_policy.delay_after(attempts_made)).await;
            }
        }

        log::error!(
            "{} OCR still running after {} attempts, giving up",
            global_constants::LOG_TAG_OCR,
            attempts_made
        );
        Err(PipelineError::TimedOut {
            attempts: attempts_made,
        })
    }
}
