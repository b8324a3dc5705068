//! OpenAI backend for scribe.
//!
//! [`OpenAiAdapter`] implements the text-completion, chat-completion and
//! streaming chat traits from `scribe-core` on top of the `/v1/completions`
//! and `/v1/chat/completions` endpoints of OpenAI or any compatible server.
mod adapter;
mod model_map;
mod provider_impl_chat;
mod provider_impl_chat_stream;
mod provider_impl_text;

pub use adapter::{OpenAiAdapter, OpenAiAdapterBuilder};
pub use client::{OpenAiClient, RetryPolicy};
pub mod api_v1;
mod client;
pub mod error;
