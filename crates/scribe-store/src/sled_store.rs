use std::path::Path;

use crate::{ArticleRecord, ArticleStore, Result};

const ARTICLES_TREE: &str = "articles";

/// [`ArticleStore`] backed by an embedded `sled` database.  Values are the
/// JSON encoding of [`ArticleRecord`].
///
/// `sled` allows a single process per database directory.
#[derive(Clone)]
pub struct SledArticleStore {
    db: sled::Db,
    tree: sled::Tree,
}

impl SledArticleStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// In-memory database removed on drop.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: sled::Db) -> Result<Self> {
        let tree = db.open_tree(ARTICLES_TREE)?;
        Ok(Self { db, tree })
    }

    /// Flush pending writes to disk.
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    fn decode(bytes: &[u8]) -> Result<ArticleRecord> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl ArticleStore for SledArticleStore {
    fn put(&self, record: &ArticleRecord) -> Result<()> {
        let value = serde_json::to_vec(record)?;
        self.tree.insert(record.key.as_bytes(), value)?;
        self.tree.flush()?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<ArticleRecord>> {
        self.tree
            .get(key.as_bytes())?
            .map(|bytes| Self::decode(&bytes))
            .transpose()
    }

    fn fetch_all(&self) -> Result<Vec<ArticleRecord>> {
        self.tree
            .iter()
            .values()
            .map(|value| Self::decode(&value?))
            .collect()
    }

    fn find_by_prefix(&self, prefix: &str) -> Result<Vec<ArticleRecord>> {
        self.tree
            .scan_prefix(prefix.as_bytes())
            .values()
            .map(|value| Self::decode(&value?))
            .collect()
    }

    fn len(&self) -> Result<usize> {
        Ok(self.tree.len())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::StoreError;

    fn at(minutes: i64) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    #[test]
    fn put_then_get() {
        let store = SledArticleStore::temporary().unwrap();
        let record = ArticleRecord::new("Why Rust", "Because.");

        store.put(&record).unwrap();

        assert_eq!(store.get(&record.key).unwrap(), Some(record));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn identical_bodies_collapse_into_one_record() {
        let store = SledArticleStore::temporary().unwrap();
        store
            .put(&ArticleRecord::with_created("First", "body", at(0)))
            .unwrap();
        store
            .put(&ArticleRecord::with_created("Second", "body", at(5)))
            .unwrap();

        let all = store.fetch_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Second");
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn history_is_newest_first() {
        let store = SledArticleStore::temporary().unwrap();
        for (minute, body) in [(3, "b"), (1, "a"), (7, "c")] {
            store
                .put(&ArticleRecord::with_created(body.to_uppercase(), body, at(minute)))
                .unwrap();
        }

        let titles: Vec<_> = store
            .history()
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["C", "B", "A"]);
    }

    #[test]
    fn resolve_accepts_unique_prefix() {
        let store = SledArticleStore::temporary().unwrap();
        let record = ArticleRecord::new("T", "abc");
        store.put(&record).unwrap();

        assert_eq!(store.resolve("BA7816").unwrap(), record);
        assert_eq!(store.resolve(&record.key).unwrap(), record);
        assert!(matches!(
            store.resolve("ffff"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.resolve(" "), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn resolve_reports_ambiguous_prefix() {
        let store = SledArticleStore::temporary().unwrap();
        for (key, body) in [("abc1", "one"), ("abc2", "two"), ("def3", "three")] {
            let mut record = ArticleRecord::new("t", body);
            record.key = key.to_owned();
            store.put(&record).unwrap();
        }

        assert!(matches!(
            store.resolve("abc"),
            Err(StoreError::AmbiguousKey { matches: 2, .. })
        ));
        assert_eq!(store.resolve("def").unwrap().article, "three");
        assert_eq!(store.find_by_prefix("ab").unwrap().len(), 2);
    }

    #[test]
    fn reopening_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let record = ArticleRecord::new("Persisted", "still here");

        {
            let store = SledArticleStore::open(dir.path()).unwrap();
            store.put(&record).unwrap();
            store.flush().unwrap();
        }

        let store = SledArticleStore::open(dir.path()).unwrap();
        assert_eq!(store.get(&record.key).unwrap(), Some(record));
    }
}
