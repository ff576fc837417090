use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File '{}' not found.", .0.display())]
    FileNotFound(PathBuf),

    #[error("OCR submission rejected with status {status}: {body}")]
    SubmissionRejected { status: u16, body: String },

    #[error("OCR failed.")]
    JobFailed,

    #[error("OCR did not finish after {attempts} polling attempts")]
    TimedOut { attempts: u32 },

    #[error("Malformed service response: {0}")]
    MalformedResponse(String),

    #[error("Failed to parse model response: {message}")]
    ParseFailed { message: String, raw_reply: String },

    #[error("Network error: {0:#}")]
    Network(anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => "file-not-found",
            Self::SubmissionRejected { .. } => "submission-rejected",
            Self::JobFailed => "job-failed",
            Self::TimedOut { .. } => "timed-out",
            Self::MalformedResponse(_) => "malformed-response",
            Self::ParseFailed { .. } => "parse-failed",
            Self::Network(_) => "network-error",
            Self::Io(_) => "io-error",
        }
    }
}
