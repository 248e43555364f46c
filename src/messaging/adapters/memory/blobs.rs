//! In-memory blob store for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::messaging::ports::{BlobStore, BlobStoreError, BlobStoreResult, ObjectRef};

/// Thread-safe in-memory blob store.
///
/// Download URLs use a `memory://` scheme so tests can assert the
/// round-trip without any network. Suitable for tests only.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    /// Creates an empty blob store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored bytes for `object`, if present.
    #[must_use]
    pub fn bytes(&self, object: &ObjectRef) -> Option<Vec<u8>> {
        self.objects
            .read()
            .ok()
            .and_then(|guard| guard.get(object.as_str()).cloned())
    }
}

fn lock_poisoned<E: std::fmt::Display>(err: E) -> BlobStoreError {
    BlobStoreError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, path: &str, bytes: &[u8]) -> BlobStoreResult<ObjectRef> {
        let mut guard = self.objects.write().map_err(lock_poisoned)?;
        guard.insert(path.to_owned(), bytes.to_vec());
        Ok(ObjectRef::new(path))
    }

    async fn download_url(&self, object: &ObjectRef) -> BlobStoreResult<String> {
        let guard = self.objects.read().map_err(lock_poisoned)?;
        if guard.contains_key(object.as_str()) {
            Ok(format!("memory://{object}"))
        } else {
            Err(BlobStoreError::NotFound(object.clone()))
        }
    }
}
