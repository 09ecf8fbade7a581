//! Filesystem document storage: one file per document id.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;

use super::{DocumentReader, DocumentStore, StoreError};

/// Stores each document as a plain file under `storage_dir`.
pub struct FileDocumentStore {
    storage_dir: PathBuf,
}

impl FileDocumentStore {
    pub fn new<P: Into<PathBuf>>(storage_dir: P) -> Self {
        Self { storage_dir: storage_dir.into() }
    }

    /// Resolves a document name to a path inside the storage directory.
    ///
    /// Names are opaque ids, not paths: anything that would escape the
    /// directory is rejected.
    fn document_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(StoreError::NotFound);
        }
        Ok(self.storage_dir.join(name))
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

fn map_io_error(err: std::io::Error) -> StoreError {
    match err.kind() {
        ErrorKind::AlreadyExists => StoreError::AlreadyExists,
        ErrorKind::NotFound => StoreError::NotFound,
        _ => StoreError::Backend(err),
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn add_document(&self, name: &str, mut data: DocumentReader) -> Result<(), StoreError> {
        let path = self.document_path(name)?;

        tokio::fs::create_dir_all(&self.storage_dir)
            .await
            .map_err(StoreError::Backend)?;

        // create_new fails with AlreadyExists when the id is taken.
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(map_io_error)?;

        tokio::io::copy(&mut data, &mut file)
            .await
            .map_err(StoreError::Backend)?;

        Ok(())
    }

    async fn remove_document(&self, name: &str) -> Result<(), StoreError> {
        let path = self.document_path(name)?;
        tokio::fs::remove_file(&path).await.map_err(map_io_error)
    }

    async fn get_document(&self, name: &str) -> Result<DocumentReader, StoreError> {
        let path = self.document_path(name)?;
        let file = tokio::fs::File::open(&path).await.map_err(map_io_error)?;
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    fn reader(bytes: &'static [u8]) -> DocumentReader {
        Box::new(bytes)
    }

    #[tokio::test]
    async fn stores_and_reads_back_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDocumentStore::new(dir.path());

        store.add_document("doc1", reader(b"hello world")).await.unwrap();

        let mut body = Vec::new();
        store
            .get_document("doc1")
            .await
            .unwrap()
            .read_to_end(&mut body)
            .await
            .unwrap();
        assert_eq!(body, b"hello world");
    }

    #[tokio::test]
    async fn second_add_fails_with_already_exists() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDocumentStore::new(dir.path());

        store.add_document("doc1", reader(b"first")).await.unwrap();
        let err = store.add_document("doc1", reader(b"second")).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists));

        // First write is untouched.
        let mut body = Vec::new();
        store
            .get_document("doc1")
            .await
            .unwrap()
            .read_to_end(&mut body)
            .await
            .unwrap();
        assert_eq!(body, b"first");
    }

    #[tokio::test]
    async fn missing_documents_report_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDocumentStore::new(dir.path());

        assert!(matches!(store.get_document("nope").await, Err(StoreError::NotFound)));
        assert!(matches!(store.remove_document("nope").await.unwrap_err(), StoreError::NotFound));
    }

    #[tokio::test]
    async fn rejects_path_traversal_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDocumentStore::new(dir.path());

        let err = store.add_document("../escape", reader(b"x")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
