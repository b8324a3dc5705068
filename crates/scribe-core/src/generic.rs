//! Vendor-neutral messages, roles and completion results.
//!
//! Prompts are written against these types; each backend converts them into
//! its own wire structs with `From`/`Into`.  Test doubles can produce them
//! directly.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// One chat message.  `content` is `None` when a provider answered without
/// text (e.g. a refusal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericMessage {
    pub content: Option<String>,
    pub role: GenericRole,
    pub name: Option<String>,
}

impl GenericMessage {
    /// Text message without a participant name.
    ///
    /// ```rust
    /// use scribe_core::generic::{GenericMessage, GenericRole};
    ///
    /// let sys = GenericMessage::new("You are a helpful bot.".into(),
    ///                               GenericRole::System);
    /// assert_eq!(sys.text(), "You are a helpful bot.");
    /// ```
    pub fn new(message: String, role: GenericRole) -> Self {
        Self {
            content: Some(message),
            role,
            name: None,
        }
    }

    /// Message content or the empty string.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Who wrote a message.  `Display` gives the lowercase wire name.
#[derive(Debug, Clone, Serialize, Deserialize, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenericRole {
    System,
    Assistant,
    User,
}

impl Display for GenericRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenericRole::System => write!(f, "system"),
            GenericRole::Assistant => write!(f, "assistant"),
            GenericRole::User => write!(f, "user"),
        }
    }
}

/// Result of a single completion round-trip.
///
/// `T` is [`GenericMessage`] for chat completions and `Vec<String>` (all
/// candidates, in provider order) for plain text completions.
#[derive(Debug, Clone)]
pub struct GenericCompletionResponse<T> {
    pub content: T,
    pub usage: Option<GenericUsageReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericUsageReport {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}
