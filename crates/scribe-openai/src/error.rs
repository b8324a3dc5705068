use reqwest::StatusCode;
use scribe_core::error::ScribeError;

/// High-level error type covering every failure mode the client can hit.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn’t (de)serialise body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("OpenAI returned non-success status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("OpenAI format error: {0}")]
    Format(String),
}

impl OpenAiError {
    /// Transient failures worth another attempt: connection problems,
    /// timeouts, rate limiting and server-side errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            OpenAiError::Http(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            OpenAiError::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            OpenAiError::Serde(_) | OpenAiError::Format(_) => false,
        }
    }
}

impl From<OpenAiError> for ScribeError {
    fn from(value: OpenAiError) -> Self {
        ScribeError::Backend(Box::new(value))
    }
}
