//! Unified error type exposed by **`scribe-core`**.
//!
//! Provider crates convert their internal errors into one of these variants
//! before bubbling them up to the [`ScribeClient`](crate::ScribeClient).  This
//! keeps the public API small while still conveying the underlying cause.

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ScribeError>;

#[derive(Debug, Error)]
pub enum ScribeError {
    /// The selected backend is present but does not recognise or support the
    /// requested `model`.
    #[error("provider `{provider}` does not support model `{model}`")]
    ModelNotSupported {
        provider: &'static str,
        model: String,
    },

    /// Generic forwarding of any backend-specific error that doesn’t fit another
    /// category.
    #[error("backend returned an error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid: {0}")]
    Invalid(String),
}
