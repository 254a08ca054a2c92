use async_trait::async_trait;
use axum::body::Bytes;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{BlobError, BlobStore, validate_key};

/// Stored object
#[derive(Debug, Clone, PartialEq)]
pub struct StoredBlob {
    pub content: Bytes,
    pub content_type: Option<String>,
}

/// In-process blob store for tests and dev runs
pub struct MemoryBlobStore {
    bucket: String,
    objects: Mutex<BTreeMap<String, StoredBlob>>,
    fail_deletes: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Mutex::new(BTreeMap::new()),
            fail_deletes: AtomicBool::new(false),
        }
    }

    pub fn get(&self, key: &str) -> Option<StoredBlob> {
        self.objects.lock().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().keys().cloned().collect()
    }

    /// Make every delete fail with an IO error.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload(
        &self,
        key: &str,
        content: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), BlobError> {
        validate_key(key)?;
        self.objects.lock().insert(
            key.to_string(),
            StoredBlob {
                content,
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        validate_key(key)?;
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(BlobError::Io(std::io::Error::other("delete disabled")));
        }
        self.objects
            .lock()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| BlobError::NotFound(key.to_string()))
    }
}
