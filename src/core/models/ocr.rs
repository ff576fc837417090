use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadOperationStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecognizedLine {
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadPage {
    #[serde(default)]
    pub lines: Vec<RecognizedLine>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    #[serde(default)]
    pub read_results: Vec<ReadPage>,
}

/// Body returned when polling an `Operation-Location` URL.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadOperation {
    pub status: ReadOperationStatus,
    #[serde(default)]
    pub analyze_result: Option<AnalyzeResult>,
}

impl ReadOperation {
    /// Joins the first page's lines with newlines. `None` when the service
    /// reported success without any page.
    pub fn first_page_text(&self) -> Option<String> {
        let page = self.analyze_result.as_ref()?.read_results.first()?;
        let lines: Vec<&str> = page.lines.iter().map(|line| line.text.as_str()).collect();
        Some(lines.join("\n"))
    }
}

/// Outcome of submitting an image to the read endpoint.
#[derive(Debug, Clone)]
pub struct ReadSubmission {
    pub status: u16,
    pub operation_location: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub filename_stem: String,
}
