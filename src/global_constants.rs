pub const APPLICATION_NAME: &str = "prescription-reader";

pub const DEFAULT_IMAGE_PATH: &str = "Prescription_2.jpg";
pub const OUTPUT_FILE_PREFIX: &str = "Extracted_";
pub const TEXT_OUTPUT_EXTENSION: &str = "txt";
pub const JSON_OUTPUT_EXTENSION: &str = "json";

pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const ENV_AZURE_API_KEY: &str = "AZURE_API_KEY";
pub const ENV_AZURE_ENDPOINT: &str = "AZURE_ENDPOINT";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_OUTPUT_DIR: &str = "PRESCRIPTION_READER_OUTPUT_DIR";

pub const AZURE_READ_ANALYZE_PATH: &str = "/vision/v3.2/read/analyze";
pub const AZURE_SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
pub const AZURE_OPERATION_LOCATION_HEADER: &str = "Operation-Location";
pub const AZURE_ACCEPTED_STATUS: u16 = 202;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_POLL_MAX_INTERVAL_MS: u64 = 10_000;
pub const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 60;
pub const DEFAULT_POLL_BACKOFF_FACTOR: f64 = 1.0;

pub const LOG_TAG_OCR: &str = "[OCR]";
pub const LOG_TAG_STRUCTURER: &str = "[STRUCTURER]";
pub const LOG_TAG_PIPELINE: &str = "[PIPELINE]";

pub const CODE_FENCE: &str = "```";
pub const JSON_LANGUAGE_TAG: &str = "json";

pub const PRESCRIPTION_PROMPT_TEMPLATE: &str = r#"
You are an assistant that extracts structured data from prescriptions.

Extract and format the following details from the prescription text below:
- patient name
- age
- gender
- date
- a list of medicines with dosage and days of consumption

Return the data in JSON format like this:
{
  "name": "John Doe",
  "age": "45",
  "gender": "Male",
  "date": "2024-06-01",
  "medicines": [
    {
      "name": "Paracetamol",
      "dosage": "500mg",
      "days": "5"
    }
  ]
}

Prescription text:
"""
{PRESCRIPTION_TEXT}
"""
"#;

pub const PROMPT_TEXT_PLACEHOLDER: &str = "{PRESCRIPTION_TEXT}";
