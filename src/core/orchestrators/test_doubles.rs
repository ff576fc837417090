use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::core::interfaces::adapters::{ChatCompletionApi, ChatCompletionRequest, ReadOcrApi};
use crate::core::models::{ReadOperation, ReadSubmission};

pub fn running() -> ReadOperation {
    serde_json::from_value(serde_json::json!({"status": "running"})).unwrap()
}

pub fn succeeded_with_lines(lines: &[&str]) -> ReadOperation {
    let lines: Vec<_> = lines
        .iter()
        .map(|text| serde_json::json!({"text": text}))
        .collect();
    serde_json::from_value(serde_json::json!({
        "status": "succeeded",
        "analyzeResult": {"readResults": [{"lines": lines}]}
    }))
    .unwrap()
}

enum SubmitBehaviour {
    Respond(ReadSubmission),
    Unreachable,
}

pub struct MockReadOcrApi {
    submit_behaviour: SubmitBehaviour,
    scripted_operations: Mutex<VecDeque<ReadOperation>>,
    submitted_bytes: Arc<Mutex<Vec<Vec<u8>>>>,
    polled_locations: Arc<Mutex<Vec<String>>>,
}

impl MockReadOcrApi {
    pub const OPERATION_LOCATION: &'static str =
        "https://example.cognitiveservices.azure.com/vision/v3.2/read/analyzeResults/op-1";

    fn with_behaviour(submit_behaviour: SubmitBehaviour, operations: Vec<ReadOperation>) -> Self {
        Self {
            submit_behaviour,
            scripted_operations: Mutex::new(operations.into()),
            submitted_bytes: Arc::new(Mutex::new(Vec::new())),
            polled_locations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn accepting(operations: Vec<ReadOperation>) -> Self {
        Self::with_behaviour(
            SubmitBehaviour::Respond(ReadSubmission {
                status: 202,
                operation_location: Some(Self::OPERATION_LOCATION.to_string()),
                body: String::new(),
            }),
            operations,
        )
    }

    pub fn accepting_without_location() -> Self {
        Self::with_behaviour(
            SubmitBehaviour::Respond(ReadSubmission {
                status: 202,
                operation_location: None,
                body: String::new(),
            }),
            vec![],
        )
    }

    pub fn rejecting(status: u16, body: &str) -> Self {
        Self::with_behaviour(
            SubmitBehaviour::Respond(ReadSubmission {
                status,
                operation_location: None,
                body: body.to_string(),
            }),
            vec![],
        )
    }

    pub fn unreachable() -> Self {
        Self::with_behaviour(SubmitBehaviour::Unreachable, vec![])
    }

    pub fn get_submit_count(&self) -> usize {
        self.submitted_bytes.lock().unwrap().len()
    }

    pub fn get_submitted_bytes(&self) -> Vec<Vec<u8>> {
        self.submitted_bytes.lock().unwrap().clone()
    }

    pub fn get_fetch_count(&self) -> usize {
        self.polled_locations.lock().unwrap().len()
    }

    pub fn get_polled_locations(&self) -> Vec<String> {
        self.polled_locations.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReadOcrApi for MockReadOcrApi {
    async fn submit_image(&self, image_bytes: Vec<u8>) -> Result<ReadSubmission> {
        self.submitted_bytes.lock().unwrap().push(image_bytes);
        match &self.submit_behaviour {
            SubmitBehaviour::Respond(submission) => Ok(submission.clone()),
            SubmitBehaviour::Unreachable => anyhow::bail!("connection refused"),
        }
    }

    async fn fetch_operation(&self, operation_location: &str) -> Result<ReadOperation> {
        self.polled_locations
            .lock()
            .unwrap()
            .push(operation_location.to_string());
        self.scripted_operations
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no scripted read operation left"))
    }
}

pub struct MockChatCompletionApi {
    reply: Result<String, String>,
    requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
}

impl MockChatCompletionApi {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletionApi for MockChatCompletionApi {
    async fn complete(&self, request: ChatCompletionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone().map_err(|message| anyhow::anyhow!(message))
    }
}
