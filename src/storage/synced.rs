//! Facade over document storage that keeps the search index in sync on
//! upload and delete.
//!
//! Blob storage and the index are two independently-committed resources. The
//! blob side always goes first and short-circuits on failure, so the index is
//! never touched for an add that never stored bytes or a remove that found
//! nothing. A failure on the index side after a successful blob mutation is
//! surfaced as a distinct error ([`StoreError::IndexingFailed`] /
//! [`StoreError::RemoveIndexFailed`]); the two resources are then out of sync
//! and no rollback is attempted.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use bytes::BytesMut;
use parking_lot::Mutex;
use tokio::io::{AsyncRead, ReadBuf};

use super::{DocumentReader, DocumentStore, StoreError};
use crate::search::{tokenizer, SearchProvider, StopWords};

/// Initial capacity of the document parse buffer. Sized so documents up to
/// ~500KB are captured without reallocation.
const INIT_BUFFER_SIZE: usize = 500 * 1024;

/// Text indexing configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextIndexConfig {
    /// When set, tokens from the built-in English common-word list are not
    /// indexed.
    pub ignore_common_words: bool,
}

/// Document store that indexes uploaded documents and de-indexes removed
/// ones.
pub struct SyncedDocumentStore {
    store: Arc<dyn DocumentStore>,
    search: Arc<dyn SearchProvider>,
    stop_words: StopWords,
}

impl SyncedDocumentStore {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        search: Arc<dyn SearchProvider>,
        cfg: TextIndexConfig,
    ) -> Self {
        let stop_words = if cfg.ignore_common_words {
            StopWords::english_common()
        } else {
            StopWords::none()
        };

        Self { store, search, stop_words }
    }
}

#[async_trait]
impl DocumentStore for SyncedDocumentStore {
    async fn add_document(&self, name: &str, data: DocumentReader) -> Result<(), StoreError> {
        // Duplicate the stream: bytes go straight through to the blob store
        // while a copy accumulates in memory for tokenization.
        let captured = Arc::new(Mutex::new(BytesMut::with_capacity(INIT_BUFFER_SIZE)));
        let tee = TeeReader { inner: data, captured: Arc::clone(&captured) };

        self.store.add_document(name, Box::new(tee)).await?;

        let text = {
            let buf = captured.lock();
            String::from_utf8_lossy(&buf).into_owned()
        };
        let words: Vec<String> = tokenizer::words(&text, &self.stop_words).into_iter().collect();

        if let Err(err) = self.search.add_document_ref(name, &words).await {
            tracing::error!(doc_id = name, error = %err, "document stored but indexing failed");
            return Err(StoreError::IndexingFailed(err));
        }

        Ok(())
    }

    async fn remove_document(&self, name: &str) -> Result<(), StoreError> {
        self.store.remove_document(name).await?;

        if let Err(err) = self.search.remove_document_ref(name).await {
            tracing::error!(doc_id = name, error = %err, "document removed but index purge failed");
            return Err(StoreError::RemoveIndexFailed(err));
        }

        Ok(())
    }

    async fn get_document(&self, name: &str) -> Result<DocumentReader, StoreError> {
        self.store.get_document(name).await
    }
}

/// Reader that appends everything it yields to a shared capture buffer.
struct TeeReader {
    inner: DocumentReader,
    captured: Arc<Mutex<BytesMut>>,
}

impl AsyncRead for TeeReader {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        match Pin::new(&mut this.inner).poll_read(cx, buf) {
            Poll::Ready(Ok(())) => {
                let chunk = &buf.filled()[before..];
                if !chunk.is_empty() {
                    this.captured.lock().extend_from_slice(chunk);
                }
                Poll::Ready(Ok(()))
            }
            other => other,
        }
    }
}
