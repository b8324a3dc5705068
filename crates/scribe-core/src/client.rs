//! Generic, lightweight client that executes prompts against a single
//! concrete backend.
//!
//! The client is **generic over the backend type `B`**, so the compiler
//! checks that the prompt’s `Message` type converts into what the backend
//! expects, and no dynamic dispatch appears in user code.  Any backend crate
//! (e.g. `scribe-openai`, or a scripted fake in tests) implements the
//! provider traits and the same client works out of the box.
use std::sync::Arc;

use crate::{
    error::Result,
    generic::{GenericCompletionResponse, GenericMessage},
    provider::{
        BoxFuture, ChatCompleteParameters, ChatCompletionProvider, StreamingChatProvider,
        TextCompleteParameters, TextCompletionProvider,
    },
    template::PromptTemplate,
};

/// A client bound to a single provider.
///
/// Cloning is cheap: the backend sits behind an `Arc`.
#[derive(Debug)]
pub struct ScribeClient<B> {
    backend: Arc<B>,
}

impl<B> Clone for ScribeClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> ScribeClient<B> {
    /// Create a new client that delegates all calls to `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run a prompt through the text-completion endpoint.
    pub fn complete_prompt<'a, P>(
        &'a self,
        prompt: P,
    ) -> BoxFuture<'a, Result<GenericCompletionResponse<Vec<String>>>>
    where
        B: TextCompletionProvider,
        P: PromptTemplate<Message = GenericMessage>,
    {
        self.backend
            .text_complete(TextCompleteParameters::from_template(prompt))
    }

    /// Run a prompt through the chat-completion endpoint.
    pub fn chat_prompt<'a, P>(
        &'a self,
        prompt: P,
    ) -> BoxFuture<'a, Result<GenericCompletionResponse<GenericMessage>>>
    where
        B: ChatCompletionProvider,
        P: PromptTemplate,
        P::Message: Into<B::Message> + Clone,
    {
        self.backend
            .chat_complete(ChatCompleteParameters::from_template(prompt))
    }

    /// Stream a prompt through the chat-completion endpoint.
    pub fn stream_prompt<'a, P>(&'a self, prompt: P) -> B::Delta<'a>
    where
        B: StreamingChatProvider,
        P: PromptTemplate,
        P::Message: Into<B::Message> + Clone,
    {
        self.backend
            .chat_complete_stream(ChatCompleteParameters::from_template(prompt))
    }
}

impl<B: TextCompletionProvider> TextCompletionProvider for ScribeClient<B> {
    fn text_complete<'a>(
        &'a self,
        params: TextCompleteParameters,
    ) -> BoxFuture<'a, Result<GenericCompletionResponse<Vec<String>>>> {
        self.backend.text_complete(params)
    }
}

impl<B: ChatCompletionProvider> ChatCompletionProvider for ScribeClient<B> {
    type Message = B::Message;

    fn chat_complete<'a, M>(
        &'a self,
        params: ChatCompleteParameters<M>,
    ) -> BoxFuture<'a, Result<GenericCompletionResponse<GenericMessage>>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'a,
    {
        self.backend.chat_complete(params)
    }
}
