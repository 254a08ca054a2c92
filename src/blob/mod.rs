//! Blob store gateway
//!
//! Objects are addressed by keys of the form `{type}s/{id}/{filename}`
//! inside a single bucket. Uploading to an existing key overwrites it.

pub mod local;
pub mod memory;

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;

use async_trait::async_trait;
use axum::body::Bytes;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlobError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Bucket name used when formatting `gs://` paths
    fn bucket(&self) -> &str;

    async fn upload(
        &self,
        key: &str,
        content: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), BlobError>;

    async fn delete(&self, key: &str) -> Result<(), BlobError>;
}

/// Reject keys that could escape the bucket or collapse segments.
pub(crate) fn validate_key(key: &str) -> Result<(), BlobError> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if bad {
        Err(BlobError::InvalidKey(key.to_string()))
    } else {
        Ok(())
    }
}
