mod chat_completion;
mod chat_completion_stream;
mod common;
mod completion;

pub use chat_completion::*;
pub use chat_completion_stream::*;
pub use common::{FinishReason, Usage};
pub use completion::*;
