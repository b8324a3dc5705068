//! Article history store.
//!
//! A flat collection of [`ArticleRecord`]s keyed by the SHA-256 digest of the
//! article body.  Reads are full scans sorted in memory, which is plenty for a
//! personal history.
mod error;
mod record;
mod sled_store;

pub use error::{Result, StoreError};
pub use record::{ArticleRecord, content_key};
pub use sled_store::SledArticleStore;

/// Persistence seam for generated articles.
pub trait ArticleStore: Send + Sync {
    /// Insert or replace the record stored under `record.key`.
    fn put(&self, record: &ArticleRecord) -> Result<()>;

    /// Exact key lookup.
    fn get(&self, key: &str) -> Result<Option<ArticleRecord>>;

    /// Every record, in key order.
    fn fetch_all(&self) -> Result<Vec<ArticleRecord>>;

    /// Records whose key starts with `prefix`.
    fn find_by_prefix(&self, prefix: &str) -> Result<Vec<ArticleRecord>> {
        Ok(self
            .fetch_all()?
            .into_iter()
            .filter(|record| record.key.starts_with(prefix))
            .collect())
    }

    /// Number of stored records.
    fn len(&self) -> Result<usize> {
        Ok(self.fetch_all()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// All records, newest first.  Ties on `created` fall back to key order so
    /// the listing is stable.
    fn history(&self) -> Result<Vec<ArticleRecord>> {
        let mut records = self.fetch_all()?;
        records.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| a.key.cmp(&b.key)));
        Ok(records)
    }

    /// Resolve a full key or a unique key prefix.
    fn resolve(&self, key_or_prefix: &str) -> Result<ArticleRecord> {
        let needle = key_or_prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(StoreError::NotFound(key_or_prefix.to_owned()));
        }

        if let Some(record) = self.get(&needle)? {
            return Ok(record);
        }

        let mut matches = self.find_by_prefix(&needle)?;
        match matches.len() {
            0 => Err(StoreError::NotFound(needle)),
            1 => Ok(matches.remove(0)),
            n => Err(StoreError::AmbiguousKey {
                prefix: needle,
                matches: n,
            }),
        }
    }
}
