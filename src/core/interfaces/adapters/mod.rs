mod chat_completion_api;
mod read_ocr_api;

pub use chat_completion_api::{ChatCompletionApi, ChatCompletionRequest};
pub use read_ocr_api::ReadOcrApi;
