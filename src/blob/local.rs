//! Filesystem blob store: `{root_dir}/{bucket}/{key}`

use async_trait::async_trait;
use axum::body::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{BlobError, BlobStore, validate_key};

pub struct LocalBlobStore {
    bucket: String,
    bucket_dir: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root_dir: impl AsRef<Path>, bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        let bucket_dir = root_dir.as_ref().join(&bucket);
        Self { bucket, bucket_dir }
    }

    fn object_path(&self, key: &str) -> Result<PathBuf, BlobError> {
        validate_key(key)?;
        Ok(self.bucket_dir.join(key))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload(
        &self,
        key: &str,
        content: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), BlobError> {
        let path = self.object_path(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &content).await?;
        tracing::debug!(
            key,
            bytes = content.len(),
            content_type = content_type.unwrap_or("application/octet-stream"),
            "blob written"
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        let path = self.object_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(BlobError::NotFound(key.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
