//! # `scribe`
//!
//! Give it a topic; it asks a text-completion model for a title, asks a chat
//! model to write the article for that title, and keeps every result in a
//! local history keyed by the SHA-256 of the article body.
//!
//! | Crate               | What it provides                                                   |
//! |---------------------|--------------------------------------------------------------------|
//! | **`scribe-core`**   | Provider traits, generic messages, models, [`ScribeClient`], errors |
//! | **`scribe-prompt`** | Markdown builder and the fixed title / article prompts             |
//! | **`scribe-store`**  | The `sled`-backed article history                                   |
//! | **`scribe-openai`** | HTTP backend for OpenAI-compatible servers *(feature `openai`)*     |
//!
//! This crate re-exports all of them and adds the application layer:
//! [`pipeline`], [`config`], [`render`], [`session`] and the [`cli`]
//! definition used by the `scribe` binary.
//!
//! ```rust,no_run
//! use scribe::{
//!     config::Settings,
//!     pipeline::ArticleGenerator,
//!     store::SledArticleStore,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load(None)?;
//!     let store = SledArticleStore::open(&settings.store.path)?;
//!     let generator = ArticleGenerator::new(settings.openai_adapter()?, store, settings.generation()?);
//!
//!     let record = generator.generate("sourdough starters").await?;
//!     println!("{}", scribe::render::render_article(&record));
//!     Ok(())
//! }
//! ```
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod session;

pub use scribe_core::{ScribeClient, generic, model, provider, template};
pub use scribe_prompt as prompt;
pub use scribe_store as store;

#[cfg(feature = "openai")]
pub use scribe_openai as openai;
