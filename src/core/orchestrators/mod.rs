mod handwriting_extractor;
mod prescription_pipeline;
mod prescription_structurer;
#[cfg(test)]
pub(crate) mod test_doubles;

pub use handwriting_extractor::HandwritingExtractor;
pub use prescription_pipeline::PrescriptionPipeline;
pub use prescription_structurer::PrescriptionStructurer;
