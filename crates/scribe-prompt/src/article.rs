//! The two fixed prompts behind article generation.
//!
//! 1. [`TitlePrompt`] asks for a title on a topic and is meant for a
//!    text-completion model.
//! 2. [`ArticlePrompt`] asks for the article body given that title and is
//!    meant for a chat model.
//!
//! ```rust
//! use scribe_core::{model::OpenAiModel, template::IntoPrompt};
//! use scribe_prompt::TitlePrompt;
//!
//! let messages = TitlePrompt::new("sourdough", OpenAiModel::Gpt35TurboInstruct.into())
//!     .into_prompt();
//! assert_eq!(messages[0].text(), "Give me a medium article title on sourdough");
//! ```
use scribe_core::{
    generic::{GenericMessage, GenericRole},
    model::Model,
    template::{IntoPrompt, PromptTemplate},
};

use crate::{chain::PromptChain, fragments::StaticFragment};

/// Render the title instruction for `topic`.
pub fn title_instruction(topic: &str) -> String {
    format!("Give me a medium article title on {topic}")
}

/// Render the article instruction for `title`.
pub fn article_instruction(title: &str) -> String {
    format!("Write a medium article for the title {title}.")
}

#[derive(Debug, Clone)]
pub struct TitlePrompt {
    topic: String,
    model: Model,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
}

impl TitlePrompt {
    pub fn new(topic: impl Into<String>, model: Model) -> Self {
        Self {
            topic: topic.into(),
            model,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl IntoPrompt for TitlePrompt {
    type Message = GenericMessage;

    fn into_prompt(self) -> Vec<Self::Message> {
        vec![GenericMessage::new(
            title_instruction(&self.topic),
            GenericRole::User,
        )]
    }
}

impl PromptTemplate for TitlePrompt {
    fn model(&self) -> Model {
        self.model.clone()
    }

    fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }
}

/// Article request with an optional system persona in front.
#[derive(Debug, Clone)]
pub struct ArticlePrompt {
    title: String,
    model: Model,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
    system: Option<String>,
}

impl ArticlePrompt {
    pub fn new(title: impl Into<String>, model: Model) -> Self {
        Self {
            title: title.into(),
            model,
            temperature: None,
            max_tokens: None,
            system: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Blank personas are ignored.
    pub fn with_system(mut self, system: Option<String>) -> Self {
        self.system = system.filter(|s| !s.trim().is_empty());
        self
    }
}

impl IntoPrompt for ArticlePrompt {
    type Message = GenericMessage;

    fn into_prompt(self) -> Vec<Self::Message> {
        let instruction = article_instruction(&self.title);

        PromptChain::new()
            .with_opt(self.system.as_deref().map(StaticFragment::from))
            .with(StaticFragment::new(&instruction, GenericRole::User))
            .build()
    }
}

impl PromptTemplate for ArticlePrompt {
    fn model(&self) -> Model {
        self.model.clone()
    }

    fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }
}
