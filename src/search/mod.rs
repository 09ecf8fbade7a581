//! Search module - provides search primitives only, does not control flow.
//!
//! Architecture principles:
//! - Exposes primitive operations: search by word, add document references,
//!   remove document references.
//! - The synced document store drives when documents get (de)indexed.
//! - Call direction: storage -> search (unidirectional).
//!
//! Index layout:
//! - Forward index: word -> set of document ids (answers queries).
//! - Reverse index: document id -> list of word keys (drives removal only).
//! - Both live in SQLite; every mutating call is one transaction.

pub mod index;
pub mod tokenizer;

pub use index::SqliteIndex;
pub use tokenizer::{words, StopWords};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the index transaction layer.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The backing store could not be reached or a transaction failed to
    /// commit. Nothing from the failed batch was applied.
    #[error("search index unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// The document's word-key list could not be read during reference
    /// removal. Distinct from the list simply not existing, which is a no-op.
    #[error("failed to get list of document references: {0}")]
    ReverseIndexRead(#[source] sqlx::Error),
}

/// Abstract document search provider.
///
/// Implementations must be safe for concurrent use; callers cancel in-flight
/// operations by dropping the future, which must never leave a
/// partially-applied batch behind.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns the ids of all documents that contain `word`.
    ///
    /// Lookups are matched against normalized (lower-cased) tokens, so the
    /// query is case-insensitive. Words that were never indexed yield an
    /// empty list. No ordering guarantee.
    async fn search_documents_by_word(&self, word: &str) -> Result<Vec<String>, IndexError>;

    /// Records that `doc_id` contains every word in `words`.
    ///
    /// All forward-set additions and reverse-list appends for one call are
    /// applied as a single atomic transaction. An empty `words` slice is a
    /// successful no-op.
    async fn add_document_ref(&self, doc_id: &str, words: &[String]) -> Result<(), IndexError>;

    /// Removes every reference to `doc_id` from the index.
    ///
    /// Succeeds as a no-op when the document was never indexed or was already
    /// removed.
    async fn remove_document_ref(&self, doc_id: &str) -> Result<(), IndexError>;
}
