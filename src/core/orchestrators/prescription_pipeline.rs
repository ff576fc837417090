use std::path::Path;

use serde_json::Value;

use crate::core::models::PipelineError;
use crate::core::orchestrators::{HandwritingExtractor, PrescriptionStructurer};
use crate::global_constants;

pub struct PrescriptionPipeline {
    extractor: HandwritingExtractor,
    structurer: PrescriptionStructurer,
}

impl PrescriptionPipeline {
    pub fn build(extractor: HandwritingExtractor, structurer: PrescriptionStructurer) -> Self {
        Self {
            extractor,
            structurer,
        }
    }

    /// `Ok(None)` when OCR produced no text, in which case the model is never
    /// called.
    pub async fn run(&self, image_path: &Path) -> Result<Option<Value>, PipelineError> {
        log::info!(
            "{} Processing prescription image {:?}",
            global_constants::LOG_TAG_PIPELINE,
            image_path
        );

        let extracted = self.extractor.extract(image_path).await?;

        if extracted.text.is_empty() {
            log::warn!(
                "{} OCR returned no text for '{}', skipping structuring",
                global_constants::LOG_TAG_PIPELINE,
                extracted.filename_stem
            );
            return Ok(None);
        }

        let record = self
            .structurer
            .structure(&extracted.text, &extracted.filename_stem)
            .await?;

        Ok(Some(record))
    }
}
