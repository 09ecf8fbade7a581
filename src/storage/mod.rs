//! Document storage.
//!
//! [`DocumentStore`] is the abstract blob storage boundary: add, fetch and
//! remove raw document bytes by an opaque id. [`local::FileDocumentStore`] is
//! the filesystem implementation, [`synced::SyncedDocumentStore`] wraps any
//! store and keeps the search index in sync on upload/delete.

pub mod local;
pub mod synced;

pub use local::FileDocumentStore;
pub use synced::{SyncedDocumentStore, TextIndexConfig};

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncRead;

use crate::search::IndexError;

/// Boxed byte stream used for document bodies.
pub type DocumentReader = Box<dyn AsyncRead + Unpin + Send>;

/// Document storage and synchronization errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Add was called for a document id that already has data. The index was
    /// not touched.
    #[error("document already exists")]
    AlreadyExists,

    /// Remove or get was called for an absent document id.
    #[error("document not found")]
    NotFound,

    /// The document bytes were stored but indexing them failed. Blob and
    /// index are now out of sync; no rollback is attempted.
    #[error("failed to index document: {0}")]
    IndexingFailed(#[source] IndexError),

    /// The document bytes were removed but purging its index references
    /// failed. Stale index entries may linger; no repair is attempted.
    #[error("failed to remove document from search index: {0}")]
    RemoveIndexFailed(#[source] IndexError),

    /// I/O failure in the storage backend.
    #[error("storage backend error: {0}")]
    Backend(#[source] std::io::Error),
}

/// Abstract document storage.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores a new document.
    ///
    /// Returns [`StoreError::AlreadyExists`] if a document with that name is
    /// already stored.
    async fn add_document(&self, name: &str, data: DocumentReader) -> Result<(), StoreError>;

    /// Removes a document from storage.
    ///
    /// Returns [`StoreError::NotFound`] if the document does not exist.
    async fn remove_document(&self, name: &str) -> Result<(), StoreError>;

    /// Returns a reader over the document's bytes.
    ///
    /// Returns [`StoreError::NotFound`] if the document does not exist.
    async fn get_document(&self, name: &str) -> Result<DocumentReader, StoreError>;
}
