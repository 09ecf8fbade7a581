//! SQLite-backed inverted index.
//!
//! Two tables:
//! - `search_words(word, doc_id)` - forward index. The composite primary key
//!   gives set semantics: a document id appears at most once per word.
//! - `search_doc_words(id, doc_id, word)` - reverse index. Rowid order
//!   preserves insertion order; duplicate word keys are tolerated when the
//!   same document is re-indexed without an intervening removal.
//!
//! Every mutating call runs inside one sqlx transaction. A dropped (cancelled)
//! transaction rolls back, so a batch either commits fully or not at all.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use super::{IndexError, SearchProvider};

/// SQLite search index.
pub struct SqliteIndex {
    db: Pool<Sqlite>,
}

impl SqliteIndex {
    /// Uses an existing connection pool. Call [`SqliteIndex::init`] before
    /// serving traffic.
    pub fn new(db: Pool<Sqlite>) -> Self {
        Self { db }
    }

    /// Opens (or creates) the index database at `db_url` and prepares it for
    /// concurrent use.
    pub async fn connect(db_url: &str) -> Result<Self, sqlx::Error> {
        let db = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(db_url)
            .await?;

        // WAL mode so searches are not blocked by index updates.
        sqlx::query("PRAGMA journal_mode=WAL").execute(&db).await?;
        sqlx::query("PRAGMA busy_timeout=10000").execute(&db).await?;
        sqlx::query("PRAGMA synchronous=NORMAL").execute(&db).await?;

        tracing::info!("search index database opened: {} (WAL mode)", db_url);

        Ok(Self { db })
    }

    /// Creates the index tables if they do not exist. Keeps existing data.
    pub async fn init(&self) -> Result<(), IndexError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS search_words (
                word TEXT NOT NULL,
                doc_id TEXT NOT NULL,
                PRIMARY KEY (word, doc_id)
            ) WITHOUT ROWID
            "#,
        )
        .execute(&self.db)
        .await
        .map_err(IndexError::Unavailable)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS search_doc_words (
                id INTEGER PRIMARY KEY,
                doc_id TEXT NOT NULL,
                word TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await
        .map_err(IndexError::Unavailable)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_doc_words_doc ON search_doc_words(doc_id)")
            .execute(&self.db)
            .await
            .map_err(IndexError::Unavailable)?;

        Ok(())
    }
}

#[async_trait]
impl SearchProvider for SqliteIndex {
    async fn search_documents_by_word(&self, word: &str) -> Result<Vec<String>, IndexError> {
        // Indexed tokens are lower-cased; normalize the query the same way.
        let rows: Vec<(String,)> = sqlx::query_as("SELECT doc_id FROM search_words WHERE word = ?")
            .bind(word.to_lowercase())
            .fetch_all(&self.db)
            .await
            .map_err(IndexError::Unavailable)?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn add_document_ref(&self, doc_id: &str, words: &[String]) -> Result<(), IndexError> {
        if words.is_empty() {
            return Ok(());
        }

        let mut tx = self.db.begin().await.map_err(IndexError::Unavailable)?;

        for word in words {
            // Forward index: word -> doc ids. OR IGNORE keeps set semantics.
            sqlx::query("INSERT OR IGNORE INTO search_words (word, doc_id) VALUES (?, ?)")
                .bind(word)
                .bind(doc_id)
                .execute(&mut *tx)
                .await
                .map_err(IndexError::Unavailable)?;

            // Reverse index: doc -> word keys, consumed by remove_document_ref.
            sqlx::query("INSERT INTO search_doc_words (doc_id, word) VALUES (?, ?)")
                .bind(doc_id)
                .bind(word)
                .execute(&mut *tx)
                .await
                .map_err(IndexError::Unavailable)?;
        }

        tx.commit().await.map_err(IndexError::Unavailable)
    }

    async fn remove_document_ref(&self, doc_id: &str) -> Result<(), IndexError> {
        // The reverse list is read outside the transaction; only the writes
        // below need to be atomic.
        // TODO: walk the full forward index as a fallback when the reverse
        // list cannot be read.
        let word_keys: Vec<(String,)> =
            sqlx::query_as("SELECT word FROM search_doc_words WHERE doc_id = ? ORDER BY id")
                .bind(doc_id)
                .fetch_all(&self.db)
                .await
                .map_err(IndexError::ReverseIndexRead)?;

        // Never indexed or already removed: nothing to do.
        if word_keys.is_empty() {
            return Ok(());
        }

        let mut tx = self.db.begin().await.map_err(IndexError::Unavailable)?;

        for (word,) in &word_keys {
            sqlx::query("DELETE FROM search_words WHERE word = ? AND doc_id = ?")
                .bind(word)
                .bind(doc_id)
                .execute(&mut *tx)
                .await
                .map_err(IndexError::Unavailable)?;
        }

        sqlx::query("DELETE FROM search_doc_words WHERE doc_id = ?")
            .bind(doc_id)
            .execute(&mut *tx)
            .await
            .map_err(IndexError::Unavailable)?;

        tx.commit().await.map_err(IndexError::Unavailable)
    }
}
