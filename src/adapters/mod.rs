mod azure_read_ocr_client;
mod openai_chat_client;

pub use azure_read_ocr_client::AzureReadOcrClient;
pub use openai_chat_client::OpenAiChatClient;
