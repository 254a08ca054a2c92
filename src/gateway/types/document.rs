//! Document upload/delete DTOs

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Multipart form accepted by `POST /upload_document` (documentation only;
/// the handler reads the fields from the stream)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadDocumentForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// `lead` or `order`
    #[schema(example = "lead")]
    pub document_type: String,
    pub document_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteDocumentQuery {
    /// `lead` or `order`
    pub document_type: String,
    pub document_id: String,
    /// Full `gs://` path as returned by the upload
    pub file_path: String,
}
