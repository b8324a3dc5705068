//! Model identifiers used throughout the **scribe** workspace.
//!
//! Well-known models get an enum variant so application code never has to
//! carry literal strings around; anything else (fine-tunes, self-hosted
//! OpenAI-compatible servers, brand-new releases) travels as
//! [`Model::Custom`].  Provider crates map the variants onto their own naming
//! scheme.
//!
//! Models are usually read from configuration, hence the [`FromStr`] impl:
//!
//! ```rust
//! use scribe_core::model::{Model, OpenAiModel};
//!
//! let model: Model = "gpt-3.5-turbo-instruct".parse().unwrap();
//! assert_eq!(model, Model::OpenAi(OpenAiModel::Gpt35TurboInstruct));
//!
//! let custom: Model = "my-finetune".parse().unwrap();
//! assert_eq!(custom, Model::Custom("my-finetune".into()));
//! ```
use std::{borrow::Cow, fmt::Display, str::FromStr};

use crate::error::ScribeError;

/// Universal identifier for an LLM model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Built-in OpenAI models.
    OpenAi(OpenAiModel),
    /// Any model name not covered by a dedicated enum.
    Custom(Cow<'static, str>),
}

/// Models the OpenAI back-end knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenAiModel {
    /// Instruct model served on the legacy *completions* endpoint.
    Gpt35TurboInstruct,
    Gpt35Turbo,
    Gpt4o,
    Gpt4oMini,
}

impl OpenAiModel {
    pub const ALL: [OpenAiModel; 4] = [
        OpenAiModel::Gpt35TurboInstruct,
        OpenAiModel::Gpt35Turbo,
        OpenAiModel::Gpt4o,
        OpenAiModel::Gpt4oMini,
    ];

    /// Canonical API name.
    pub const fn as_str(self) -> &'static str {
        match self {
            OpenAiModel::Gpt35TurboInstruct => "gpt-3.5-turbo-instruct",
            OpenAiModel::Gpt35Turbo => "gpt-3.5-turbo",
            OpenAiModel::Gpt4o => "gpt-4o",
            OpenAiModel::Gpt4oMini => "gpt-4o-mini",
        }
    }
}

impl From<OpenAiModel> for Model {
    fn from(val: OpenAiModel) -> Self {
        Model::OpenAi(val)
    }
}

impl FromStr for Model {
    type Err = ScribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ScribeError::Invalid("model name must not be empty".into()));
        }

        Ok(OpenAiModel::ALL
            .into_iter()
            .find(|m| m.as_str() == name)
            .map(Model::OpenAi)
            .unwrap_or_else(|| Model::Custom(Cow::Owned(name.to_owned()))))
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Model::OpenAi(m) => f.write_str(m.as_str()),
            Model::Custom(name) => f.write_str(name),
        }
    }
}
