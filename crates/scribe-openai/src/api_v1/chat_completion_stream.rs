use serde::Deserialize;

use super::{
    chat_completion::MessageRole,
    common::{FinishReason, Usage},
};

/// Incremental piece of the assistant message.  The first chunk usually
/// carries only the role, later ones only text.
#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletionMessageDelta {
    #[serde(default)]
    pub role: Option<MessageRole>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunkChoice {
    #[serde(default)]
    pub index: i64,
    #[serde(default)]
    pub delta: ChatCompletionMessageDelta,
    pub finish_reason: Option<FinishReason>,
}

/// One `data:` payload of a streamed chat completion.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunkResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ChatCompletionChunkChoice>,
    /// Only present on the final chunk when the request asked for it.
    #[serde(default)]
    pub usage: Option<Usage>,
}
