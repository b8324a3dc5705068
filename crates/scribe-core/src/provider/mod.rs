//! Traits a concrete backend implements.
//!
//! Every method returns a boxed future (or stream) so the traits stay usable
//! without `async_trait` and without tying callers to a runtime.
mod chat_complete;
mod text_complete;

use std::{future::Future, pin::Pin};

pub use chat_complete::{ChatCompleteParameters, ChatCompletionProvider, StreamingChatProvider};
pub use text_complete::{TextCompleteParameters, TextCompletionProvider};

/// Owned, pinned, `Send` future borrowed for `'a`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
