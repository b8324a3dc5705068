use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Sled(#[from] sled::Error),

    #[error("corrupt record: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("key prefix `{prefix}` matches {matches} articles")]
    AmbiguousKey { prefix: String, matches: usize },

    #[error("no article with key `{0}`")]
    NotFound(String),
}
