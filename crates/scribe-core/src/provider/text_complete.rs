use super::BoxFuture;
use crate::{
    error::Result,
    generic::{GenericCompletionResponse, GenericMessage},
    model::Model,
    template::{PromptTemplate, flatten_prompt},
};

/// A backend for plain **text completion**: one prompt string in, one or more
/// candidate continuations out.
pub trait TextCompletionProvider: Send + Sync {
    /// Execute the prompt and return every candidate in provider order.
    fn text_complete<'a>(
        &'a self,
        params: TextCompleteParameters,
    ) -> BoxFuture<'a, Result<GenericCompletionResponse<Vec<String>>>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextCompleteParameters {
    pub prompt: String,
    pub model: Model,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl TextCompleteParameters {
    pub fn new(prompt: impl Into<String>, model: Model) -> Self {
        Self {
            prompt: prompt.into(),
            model,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Build parameters from a chat-shaped [`PromptTemplate`]; the messages
    /// are flattened with [`flatten_prompt`].
    pub fn from_template<P>(prompt: P) -> Self
    where
        P: PromptTemplate<Message = GenericMessage>,
    {
        let model = prompt.model();
        let temperature = prompt.temperature();
        let max_tokens = prompt.max_tokens();
        let messages = prompt.into_prompt();

        Self {
            prompt: flatten_prompt(&messages),
            model,
            temperature,
            max_tokens,
        }
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
