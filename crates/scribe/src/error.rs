use scribe_core::error::ScribeError;
use scribe_store::{ArticleRecord, StoreError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Everything that can stop an article from being produced or shown.
///
/// The `Display` text of the first three variants is shown to the user
/// verbatim.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Please enter a topic for the article.")]
    EmptyTopic,

    #[error("Failed to generate a title for the article.")]
    NoTitle,

    #[error("Failed to generate the content of the article.")]
    NoArticle,

    #[error("title request failed: {0}")]
    TitleRequest(#[source] ScribeError),

    #[error("article request failed: {0}")]
    ArticleRequest(#[source] ScribeError),

    #[error("no article #{0} in the history")]
    NoSuchEntry(usize),

    #[error("`{0}` is not a history position; use `#N` or a key")]
    InvalidSelector(String),

    /// Both model calls succeeded but the store rejected the record.  The
    /// article is carried along so it can still be shown.
    #[error("The article could not be saved to the history: {source}")]
    NotSaved {
        record: Box<ArticleRecord>,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GenerateError {
    /// One line suitable for the terminal.  Request failures keep the
    /// stage-specific wording and append the underlying cause.
    pub fn user_message(&self) -> String {
        match self {
            GenerateError::TitleRequest(source) => {
                format!("{} ({source})", GenerateError::NoTitle)
            }
            GenerateError::ArticleRequest(source) => {
                format!("{} ({source})", GenerateError::NoArticle)
            }
            other => other.to_string(),
        }
    }

    /// The generated article that failed to persist, if any.
    pub fn unsaved_record(&self) -> Option<&ArticleRecord> {
        match self {
            GenerateError::NotSaved { record, .. } => Some(record),
            _ => None,
        }
    }
}
