//! Abstractions that tie a **prompt** to a concrete **model**.
//!
//! A developer usually needs only two traits to go from “some string
//! fragments” to “ready-to-send payload”:
//!
//! 1. [`IntoPrompt`] – turns *any* value into a list of chat messages.
//! 2. [`PromptTemplate`] – adds the target model and sampling options.
//!
//! Provider back-ends accept *any* `P` that implements **both** traits.
//!
//! ```rust
//! use scribe_core::template::{IntoPrompt, PromptTemplate};
//! use scribe_core::generic::{GenericMessage, GenericRole};
//! use scribe_core::model::{Model, OpenAiModel};
//!
//! struct HelloPrompt;
//!
//! impl IntoPrompt for HelloPrompt {
//!     type Message = GenericMessage;
//!     fn into_prompt(self) -> Vec<Self::Message> {
//!         vec![GenericMessage::new("Say hello!".into(), GenericRole::User)]
//!     }
//! }
//!
//! impl PromptTemplate for HelloPrompt {
//!     fn model(&self) -> Model {
//!         Model::OpenAi(OpenAiModel::Gpt4oMini)
//!     }
//! }
//! ```
use crate::{generic::GenericMessage, model::Model};

/// High-level description of a prompt.
///
/// Implement this trait **in addition** to [`IntoPrompt`] to specify which
/// model should handle the request.  Model and temperature are methods rather
/// than constants because they usually come from runtime configuration.
pub trait PromptTemplate: IntoPrompt {
    /// Logical model identifier.  The back-end maps it to its own naming
    /// scheme.
    fn model(&self) -> Model;

    /// Sampling temperature; `None` leaves the provider default in place.
    fn temperature(&self) -> Option<f64> {
        None
    }

    /// Upper bound on generated tokens; `None` leaves the provider default.
    fn max_tokens(&self) -> Option<u32> {
        None
    }
}

/// Converts a value into a series of chat messages.
///
/// The `Message` type is an **associated type** so a back-end can require its
/// own richer struct without resorting to dynamic dispatch.
pub trait IntoPrompt {
    /// Chat message representation emitted by the prompt.
    type Message: Send + Sync + 'static;

    /// Consume `self` and return **all** messages in the desired order.
    fn into_prompt(self) -> Vec<Self::Message>;
}

/// Convenience implementation so a single [`GenericMessage`] can be passed
/// directly to the client without wrapping it in a struct.
impl IntoPrompt for GenericMessage {
    type Message = GenericMessage;

    fn into_prompt(self) -> Vec<Self::Message> {
        vec![self]
    }
}

/// Collapse chat messages into the single prompt string a text-completion
/// endpoint expects.  Contents are joined by a blank line; empty messages are
/// skipped.
pub fn flatten_prompt(messages: &[GenericMessage]) -> String {
    messages
        .iter()
        .map(GenericMessage::text)
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
