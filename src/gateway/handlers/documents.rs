//! Document upload/delete handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Query, State},
};

use super::super::error::{ApiError, ApiResult};
use super::super::state::AppState;
use super::super::types::{DeleteDocumentQuery, MessageResponse, UploadDocumentForm, UploadResponse};
use crate::crm::Upload;

/// Upload a file and attach it to a lead or order
///
/// Re-uploading the same filename overwrites the stored file.
#[utoipa::path(
    post,
    path = "/upload_document",
    request_body(content = UploadDocumentForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored and attached", body = UploadResponse),
        (status = 400, description = "Invalid document type or form"),
        (status = 404, description = "Owner not found")
    ),
    tag = "Documents"
)]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut upload = None;
    let mut document_type = None;
    let mut document_id = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| ApiError::bad_request("Missing file name"))?;
                let content_type = field.content_type().map(str::to_string);
                let content = field.bytes().await?;
                upload = Some(Upload {
                    filename,
                    content,
                    content_type,
                });
            }
            "document_type" => document_type = Some(field.text().await?),
            "document_id" => document_id = Some(field.text().await?),
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| ApiError::bad_request("Missing form field: file"))?;
    let document_type =
        document_type.ok_or_else(|| ApiError::bad_request("Missing form field: document_type"))?;
    let document_id =
        document_id.ok_or_else(|| ApiError::bad_request("Missing form field: document_id"))?;

    let file_path = state
        .attachments
        .upload(&document_type, &document_id, upload)
        .await?;

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        file_path,
    }))
}

/// Delete a stored file and detach it from its owner
#[utoipa::path(
    delete,
    path = "/delete_document",
    params(DeleteDocumentQuery),
    responses(
        (status = 200, description = "Document deleted", body = MessageResponse),
        (status = 400, description = "Invalid document type or path"),
        (status = 404, description = "Owner not found"),
        (status = 500, description = "Storage delete failed")
    ),
    tag = "Documents"
)]
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeleteDocumentQuery>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .attachments
        .delete(&query.document_type, &query.document_id, &query.file_path)
        .await?;
    Ok(Json(MessageResponse::new("Document deleted successfully")))
}
