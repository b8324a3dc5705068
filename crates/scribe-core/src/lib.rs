//! # `scribe-core`
//!
//! Provider-agnostic building blocks shared by every crate in the workspace:
//!
//! * [`generic`] – message, role and response types that do not depend on any
//!   particular LLM vendor,
//! * [`model`] – typed model identifiers,
//! * [`template`] – the [`IntoPrompt`](template::IntoPrompt) /
//!   [`PromptTemplate`](template::PromptTemplate) traits,
//! * [`provider`] – the traits a backend implements (text completion, chat
//!   completion, streaming chat),
//! * [`ScribeClient`] – a thin generic client bound to one backend.
pub mod client;
pub mod error;
pub mod generic;
pub mod model;
pub mod provider;
pub mod template;

pub use client::ScribeClient;
