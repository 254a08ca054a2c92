//! Request and response DTOs for the HTTP surface

pub mod document;
pub mod lead;
pub mod order;
pub mod response;

pub use document::{DeleteDocumentQuery, UploadDocumentForm};
pub use lead::{LeadCreate, LeadQuery, StageUpdate};
pub use order::{OrderCreate, OrderQuery, OrderUpdate, StatusUpdate};
pub use response::{ApiResponse, MessageResponse, UploadResponse, error_codes};
