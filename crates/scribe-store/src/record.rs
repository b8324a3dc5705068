use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One generated article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Lowercase hex SHA-256 of `article`.
    pub key: String,
    pub title: String,
    pub article: String,
    pub created: DateTime<Utc>,
}

impl ArticleRecord {
    /// New record stamped with the current time.
    pub fn new(title: impl Into<String>, article: impl Into<String>) -> Self {
        Self::with_created(title, article, Utc::now())
    }

    pub fn with_created(
        title: impl Into<String>,
        article: impl Into<String>,
        created: DateTime<Utc>,
    ) -> Self {
        let article = article.into();

        Self {
            key: content_key(&article),
            title: title.into(),
            article,
            created,
        }
    }

    /// First `len` characters of the key, for display.
    pub fn short_key(&self, len: usize) -> &str {
        let end = self.key.len().min(len);
        &self.key[..end]
    }
}

/// Hex SHA-256 digest of the article body.
pub fn content_key(article: &str) -> String {
    hex::encode(Sha256::digest(article.as_bytes()))
}
