mod app_settings;
mod ocr;
mod pipeline_error;
mod poll_policy;
mod prescription;

pub use app_settings::{AppSettings, ServiceCredentials};
pub use ocr::{ExtractedText, ReadOperation, ReadOperationStatus, ReadSubmission};
pub use pipeline_error::PipelineError;
pub use poll_policy::PollPolicy;
pub use prescription::PrescriptionRecord;
