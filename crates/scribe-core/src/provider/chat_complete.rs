use futures_core::stream::Stream;

use super::BoxFuture;
use crate::{
    error::Result,
    generic::{GenericCompletionResponse, GenericMessage},
    model::Model,
    template::PromptTemplate,
};

/// A **backend** turns a chat prompt into a network call to a concrete provider
/// and parses the chat response.
///
/// * **One associated type** – the in-memory `Message` representation this
///   provider accepts.
/// * **One async-ish method** – `chat_complete`, which performs a *single*
///   non-streaming round-trip and returns the assistant message.
pub trait ChatCompletionProvider: Send + Sync {
    /// Chat message type consumed by this backend.
    type Message: Send + Sync + 'static;

    fn chat_complete<'a, M>(
        &'a self,
        params: ChatCompleteParameters<M>,
    ) -> BoxFuture<'a, Result<GenericCompletionResponse<GenericMessage>>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'a;
}

/// A provider that can deliver the model’s answer **incrementally**.
///
/// The stream yields UTF-8 text *deltas*; concatenated they form the full
/// assistant message.
pub trait StreamingChatProvider: ChatCompletionProvider {
    type Delta<'s>: Stream<Item = Result<String>> + Send + 's
    where
        Self: 's;

    /// Start a streaming chat completion.
    fn chat_complete_stream<'s, M>(&'s self, params: ChatCompleteParameters<M>) -> Self::Delta<'s>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 's;
}

#[derive(Debug, Clone)]
pub struct ChatCompleteParameters<M> {
    pub messages: Vec<M>,
    pub model: Model,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl<M> ChatCompleteParameters<M> {
    pub fn new(messages: Vec<M>, model: Model) -> Self {
        Self {
            messages,
            model,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Build parameters from a [`PromptTemplate`], taking over its model and
    /// sampling options.
    pub fn from_template<P>(prompt: P) -> Self
    where
        P: PromptTemplate<Message = M>,
    {
        let model = prompt.model();
        let temperature = prompt.temperature();
        let max_tokens = prompt.max_tokens();

        Self {
            messages: prompt.into_prompt(),
            model,
            temperature,
            max_tokens,
        }
    }

    pub fn messages(&self) -> &[M] {
        &self.messages
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}
