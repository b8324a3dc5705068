//! Simple **builder** that concatenates multiple values implementing
//! [`IntoPrompt`].
//!
//! Prompts are often assembled from smaller, reusable *fragments*: an
//! optional persona, then the actual instruction.  `PromptChain` lines them up
//! without mutable vectors or verbose `extend()` calls:
//!
//! ```rust
//! use scribe_prompt::{chain::PromptChain, fragments::StaticFragment};
//! use scribe_core::generic::{GenericMessage, GenericRole};
//!
//! let messages: Vec<GenericMessage> = PromptChain::new()
//!     .with(StaticFragment::new("You are a tech writer.", GenericRole::System))
//!     .with(StaticFragment::new("Write about Rust.", GenericRole::User))
//!     .build();
//!
//! assert_eq!(messages.len(), 2);
//! ```
use scribe_core::template::IntoPrompt;

/// Lightweight container that accumulates messages produced by
/// [`IntoPrompt`] implementors.
pub struct PromptChain<Message>(Vec<Message>);

impl<Message> Default for PromptChain<Message> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Message> PromptChain<Message> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self(vec![])
    }

    /// Append the messages produced by `with` to the chain.
    pub fn with(mut self, with: impl IntoPrompt<Message = Message>) -> Self {
        self.0.append(&mut with.into_prompt());
        self
    }

    /// Append `with` only if it is `Some`.
    pub fn with_opt(self, with: Option<impl IntoPrompt<Message = Message>>) -> Self {
        match with {
            Some(with) => self.with(with),
            None => self,
        }
    }

    /// Consume the builder and return the accumulated messages.
    pub fn build(self) -> Vec<Message> {
        self.0
    }
}
