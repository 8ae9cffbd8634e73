#![doc = "Defines the BlobStore trait for pluggable storage backends."]

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StorageError;

mod file;
pub use file::FileBlobStore;

/// Trait for asynchronous storage of whole JSON documents under string keys.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Reads the blob stored under `key`, or `None` if nothing was written yet.
    async fn read_blob(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the blob stored under `key`.
    async fn write_blob(&self, key: &str, blob: String) -> Result<(), StorageError>;

    /// Checks if a blob exists under `key`.
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.read_blob(key).await?.is_some())
    }
}

/// Reads and deserializes the document under `key`.
///
/// A missing key and an empty blob both yield `T::default()`.
pub async fn read_json<T, S>(store: &S, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
    S: BlobStore + ?Sized,
{
    match store.read_blob(key).await? {
        Some(raw) if !raw.trim().is_empty() => {
            serde_json::from_str(&raw).map_err(|source| StorageError::Serialization {
                key: key.to_string(),
                source,
            })
        }
        _ => Ok(T::default()),
    }
}

/// Serializes `value` as pretty JSON and replaces the document under `key`.
pub async fn write_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + Sync + ?Sized,
    S: BlobStore + ?Sized,
{
    let raw = serde_json::to_string_pretty(value).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.write_blob(key, raw).await
}

/// An in-memory implementation of `BlobStore` for testing and ephemeral nodes.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Default::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn read_blob(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.blobs.read().await;
        Ok(guard.get(key).cloned())
    }

    async fn write_blob(&self, key: &str, blob: String) -> Result<(), StorageError> {
        let mut guard = self.blobs.write().await;
        guard.insert(key.to_string(), blob);
        Ok(())
    }
}

/// Enum to represent the configured storage backend.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Process-local, lost on exit
    InMemory(MemoryBlobStore),
    /// One JSON file per key
    File(FileBlobStore),
}

#[async_trait]
impl BlobStore for StorageBackend {
    async fn read_blob(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            StorageBackend::InMemory(s) => s.read_blob(key).await,
            StorageBackend::File(s) => s.read_blob(key).await,
        }
    }

    async fn write_blob(&self, key: &str, blob: String) -> Result<(), StorageError> {
        match self {
            StorageBackend::InMemory(s) => s.write_blob(key, blob).await,
            StorageBackend::File(s) => s.write_blob(key, blob).await,
        }
    }
}
