use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use crate::core::interfaces::adapters::{ChatCompletionApi, ChatCompletionRequest};
use crate::core::models::PipelineError;
use crate::global_constants;
use crate::utils;

pub fn build_prescription_prompt(prescription_text: &str) -> String {
    global_constants::PRESCRIPTION_PROMPT_TEMPLATE.replacen(
        global_constants::PROMPT_TEXT_PLACEHOLDER,
        prescription_text,
        1,
    )
}

/// Trims the reply and removes a surrounding markdown fence, including an
/// optional `json` language tag after the opening fence.
pub fn clean_model_reply(raw_reply: &str) -> &str {
    let trimmed = raw_reply.trim();
    if !trimmed.starts_with(global_constants::CODE_FENCE) {
        return trimmed;
    }

    let unfenced = trimmed.trim_matches('`');
    let untagged = unfenced
        .strip_prefix(global_constants::JSON_LANGUAGE_TAG)
        .unwrap_or(unfenced);

    untagged.trim()
}

/// Turns OCR text into a JSON record by asking the language model.
pub struct PrescriptionStructurer {
    chat_api: Arc<dyn ChatCompletionApi>,
    temperature: f32,
    output_directory: PathBuf,
}

impl PrescriptionStructurer {
    pub fn build(
        chat_api: Arc<dyn ChatCompletionApi>,
        temperature: f32,
        output_directory: PathBuf,
    ) -> Self {
        Self {
            chat_api,
            temperature,
            output_directory,
        }
    }

    pub async fn structure(
        &self,
        prescription_text: &str,
        filename_stem: &str,
    ) -> Result<Value, PipelineError> {
        log::info!(
            "{} Sending extracted text to GPT for structuring...",
            global_constants::LOG_TAG_STRUCTURER
        );

        let request = ChatCompletionRequest {
            user_message: build_prescription_prompt(prescription_text),
            temperature: self.temperature,
        };

        let raw_reply = self
            .chat_api
            .complete(request)
            .await
            .map_err(PipelineError::Network)?;

        log::debug!(
            "{} Raw model reply: {}",
            global_constants::LOG_TAG_STRUCTURER,
            raw_reply
        );

        let record: Value = match serde_json::from_str(clean_model_reply(&raw_reply)) {
            Ok(record) => record,
            Err(error) => {
                log::error!(
                    "{} Failed to parse GPT response: {}",
                    global_constants::LOG_TAG_STRUCTURER,
                    error
                );
                log::error!(
                    "{} Raw GPT response:\n{}",
                    global_constants::LOG_TAG_STRUCTURER,
                    raw_reply
                );
                return Err(PipelineError::ParseFailed {
                    message: error.to_string(),
                    raw_reply,
                });
            }
        };

        let output_path = utils::build_output_path(
            &self.output_directory,
            filename_stem,
            global_constants::JSON_OUTPUT_EXTENSION,
        );
        let contents = serde_json::to_string_pretty(&record)
            .map_err(|e| PipelineError::MalformedResponse(e.to_string()))?;
        utils::write_file_atomically(&output_path, contents.as_bytes()).await?;

        log::info!(
            "{} Structured JSON saved to '{}'",
            global_constants::LOG_TAG_STRUCTURER,
            output_path.display()
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::orchestrators::test_doubles::MockChatCompletionApi;
    use serde_json::json;

    fn build_structurer(
        api: Arc<MockChatCompletionApi>,
        output_dir: &std::path::Path,
    ) -> PrescriptionStructurer {
        PrescriptionStructurer::build(api, 0.2, output_dir.to_path_buf())
    }

    #[test]
    fn test_clean_model_reply_strips_json_fence() {
        let reply = "```json\n{\"name\":\"Jane\"}\n```";

        assert_eq!(clean_model_reply(reply), "{\"name\":\"Jane\"}");
    }

    #[test]
    fn test_clean_model_reply_strips_bare_fence() {
        let reply = "  ```\n{\"age\": \"45\"}\n```  \n";

        assert_eq!(clean_model_reply(reply), "{\"age\": \"45\"}");
    }

    #[test]
    fn test_clean_model_reply_only_strips_tag_directly_after_fence() {
        let reply = "``` json\n{\"name\":\"Jane\"}```";

        assert_eq!(clean_model_reply(reply), "json\n{\"name\":\"Jane\"}");
    }

    #[test]
    fn test_clean_model_reply_leaves_plain_json_alone() {
        assert_eq!(clean_model_reply("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_clean_model_reply_keeps_json_word_inside_unfenced_reply() {
        assert_eq!(clean_model_reply("json {}"), "json {}");
    }

    #[test]
    fn test_prompt_embeds_text_verbatim() {
        let prompt = build_prescription_prompt("Rx: Paracetamol\n500mg for 5 days");

        assert!(prompt.contains("\"\"\"\nRx: Paracetamol\n500mg for 5 days\n\"\"\""));
        assert!(prompt.contains("\"medicines\": ["));
        assert!(!prompt.contains(global_constants::PROMPT_TEXT_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_structure_parses_fenced_reply_and_writes_json_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let api = Arc::new(MockChatCompletionApi::replying(
            "```json\n{\"name\":\"Jane\"}\n```",
        ));
        let structurer = build_structurer(Arc::clone(&api), temp_dir.path());

        let record = structurer.structure("Jane, 34", "Prescription_2").await.unwrap();

        assert_eq!(record, json!({"name": "Jane"}));
        let saved =
            std::fs::read_to_string(temp_dir.path().join("Extracted_Prescription_2.json")).unwrap();
        assert_eq!(saved, "{\n  \"name\": \"Jane\"\n}");
    }

    #[tokio::test]
    async fn test_structure_sends_single_prompt_with_low_temperature() {
        let temp_dir = tempfile::tempdir().unwrap();
        let api = Arc::new(MockChatCompletionApi::replying("{}"));
        let structurer = build_structurer(Arc::clone(&api), temp_dir.path());

        structurer.structure("Amoxicillin 250mg", "rx").await.unwrap();

        let requests = api.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].temperature, 0.2);
        assert!(requests[0].user_message.contains("Amoxicillin 250mg"));
    }

    #[tokio::test]
    async fn test_structure_accepts_unexpected_json_shape() {
        let temp_dir = tempfile::tempdir().unwrap();
        let api = Arc::new(MockChatCompletionApi::replying("[1, 2, 3]"));
        let structurer = build_structurer(Arc::clone(&api), temp_dir.path());

        let record = structurer.structure("text", "rx").await.unwrap();

        assert_eq!(record, json!([1, 2, 3]));
        assert!(temp_dir.path().join("Extracted_rx.json").exists());
    }

    #[tokio::test]
    async fn test_invalid_json_reply_returns_parse_failed_without_writing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let api = Arc::new(MockChatCompletionApi::replying(
            "Sorry, I cannot read this prescription.",
        ));
        let structurer = build_structurer(Arc::clone(&api), temp_dir.path());

        let result = structurer.structure("illegible", "rx").await;

        match result {
            Err(PipelineError::ParseFailed { raw_reply, .. }) => {
                assert_eq!(raw_reply, "Sorry, I cannot read this prescription.");
            }
            other => panic!("expected ParseFailed, got {:?}", other),
        }
        assert!(!temp_dir.path().join("Extracted_rx.json").exists());
    }

    #[tokio::test]
    async fn test_invalid_json_reply_keeps_previous_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("Extracted_rx.json");
        std::fs::write(&output_path, "{\"name\": \"Previous\"}").unwrap();
        let api = Arc::new(MockChatCompletionApi::replying("```json\n{\"name\": \"Jane\"\n```"));
        let structurer = build_structurer(Arc::clone(&api), temp_dir.path());

        let result = structurer.structure("text", "rx").await;

        assert!(matches!(result, Err(PipelineError::ParseFailed { .. })));
        assert_eq!(
            std::fs::read_to_string(&output_path).unwrap(),
            "{\"name\": \"Previous\"}"
        );
    }

    #[tokio::test]
    async fn test_chat_failure_surfaces_as_network_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let api = Arc::new(MockChatCompletionApi::failing("OpenAI returned 401"));
        let structurer = build_structurer(Arc::clone(&api), temp_dir.path());

        let result = structurer.structure("text", "rx").await;

        assert!(matches!(result, Err(PipelineError::Network(_))));
        assert_eq!(api.get_request_count(), 1);
    }
}
