//! Prompt composition for scribe.
//!
//! * [`builder`] – fluent markdown builder,
//! * [`chain`] – concatenation of [`IntoPrompt`](scribe_core::template::IntoPrompt)
//!   fragments,
//! * [`fragments`] – reusable fragments,
//! * [`article`] – the two fixed prompts of the article workflow.
pub mod article;
pub mod builder;
pub mod chain;
pub mod fragments;

pub use article::{ArticlePrompt, TitlePrompt};
