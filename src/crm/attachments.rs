//! Attachment Service - binds blobs to a lead's or order's document list

use axum::body::Bytes;
use std::sync::Arc;

use super::error::{CrmError, CrmResult};
use super::models::{DocumentRef, OwnerKind};
use super::store::CrmStore;
use crate::blob::BlobStore;

/// File received for upload
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content: Bytes,
    pub content_type: Option<String>,
}

/// Parse the `document_type` field (`lead` or `order`).
pub fn parse_owner_kind(document_type: &str) -> CrmResult<OwnerKind> {
    document_type.parse().map_err(|_| {
        CrmError::invalid_argument("Invalid document type. Must be 'lead' or 'order'.")
    })
}

fn validate_filename(filename: &str) -> CrmResult<()> {
    if filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains('/')
        || filename.contains('\\')
    {
        return Err(CrmError::invalid_argument(format!(
            "Invalid file name: '{}'",
            filename
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct AttachmentService {
    store: Arc<dyn CrmStore>,
    blobs: Arc<dyn BlobStore>,
}

impl AttachmentService {
    pub fn new(store: Arc<dyn CrmStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    fn owner_not_found(kind: OwnerKind, owner_id: &str) -> CrmError {
        CrmError::not_found(format!("{} with ID {} not found", kind.label(), owner_id))
    }

    async fn ensure_owner(&self, kind: OwnerKind, owner_id: &str) -> CrmResult<()> {
        let exists = match kind {
            OwnerKind::Lead => self.store.get_lead(owner_id).await?.is_some(),
            OwnerKind::Order => self.store.get_order(owner_id).await?.is_some(),
        };
        if exists {
            Ok(())
        } else {
            Err(Self::owner_not_found(kind, owner_id))
        }
    }

    /// Store the file at `{type}s/{id}/{filename}` and attach its path to
    /// the owner. Returns the `gs://` storage path.
    pub async fn upload(
        &self,
        document_type: &str,
        owner_id: &str,
        upload: Upload,
    ) -> CrmResult<String> {
        let kind = parse_owner_kind(document_type)?;
        validate_filename(&upload.filename)?;
        self.ensure_owner(kind, owner_id).await?;

        let doc = DocumentRef::new(
            self.blobs.bucket(),
            kind,
            owner_id,
            upload.filename,
            upload.content_type,
        );

        self.blobs
            .upload(&doc.blob_key(), upload.content, doc.content_type.as_deref())
            .await
            .inspect_err(|e| {
                tracing::error!(key = %doc.blob_key(), "Error uploading file to storage: {}", e)
            })?;

        // The owner may have been deleted since the existence check.
        if !self.store.attach_document(&doc).await? {
            tracing::warn!(
                owner = %kind,
                owner_id,
                "owner vanished before attach, blob left at {}",
                doc.storage_path
            );
            return Err(Self::owner_not_found(kind, owner_id));
        }

        tracing::info!(owner = %kind, owner_id, path = %doc.storage_path, "document uploaded");
        Ok(doc.storage_path)
    }

    /// Delete the blob behind `storage_path` and detach the path from the
    /// owner. A path missing from the owner's list is only logged.
    pub async fn delete(
        &self,
        document_type: &str,
        owner_id: &str,
        storage_path: &str,
    ) -> CrmResult<()> {
        let kind = parse_owner_kind(document_type)?;
        self.ensure_owner(kind, owner_id).await?;

        let doc = match self
            .store
            .find_document(kind, owner_id, storage_path)
            .await?
        {
            Some(doc) => doc,
            None => DocumentRef::parse(self.blobs.bucket(), kind, owner_id, storage_path)
                .map_err(|e| CrmError::invalid_argument(format!("Invalid file path: {}", e)))?,
        };

        if let Err(e) = self.blobs.delete(&doc.blob_key()).await {
            tracing::error!(key = %doc.blob_key(), "Error deleting file from storage: {}", e);
            return Err(CrmError::Internal(
                "Failed to delete file from storage".to_string(),
            ));
        }

        if !self
            .store
            .detach_document(kind, owner_id, storage_path)
            .await?
        {
            tracing::warn!(
                "Document path {} not found in {} {}",
                storage_path,
                kind,
                owner_id
            );
        }

        tracing::info!(owner = %kind, owner_id, path = storage_path, "document deleted");
        Ok(())
    }
}
