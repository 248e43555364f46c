//! Blob storage port for image message payloads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for blob store operations.
pub type BlobStoreResult<T> = Result<T, BlobStoreError>;

/// Reference to an uploaded object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectRef(String);

impl ObjectRef {
    /// Creates a reference from a storage path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the storage path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Binary object storage contract.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Uploads `bytes` under `path` and returns a reference to the
    /// stored object.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Unavailable`] when the upload fails.
    async fn upload(&self, path: &str, bytes: &[u8]) -> BlobStoreResult<ObjectRef>;

    /// Resolves a stored object to a download URL.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::NotFound`] when the object does not
    /// exist.
    async fn download_url(&self, object: &ObjectRef) -> BlobStoreResult<String>;
}

/// Errors returned by blob store implementations.
#[derive(Debug, Clone, Error)]
pub enum BlobStoreError {
    /// No object is stored under the given reference.
    #[error("blob not found: {0}")]
    NotFound(ObjectRef),

    /// The store could not serve the operation.
    #[error("blob store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl BlobStoreError {
    /// Wraps a store-layer failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
