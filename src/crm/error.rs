use thiserror::Error;

use super::store::StoreError;
use crate::blob::BlobError;

/// Coarse failure category surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    Internal,
}

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Blob storage error: {0}")]
    Blob(#[from] BlobError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CrmError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Store(_) | Self::Blob(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

pub type CrmResult<T> = Result<T, CrmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(CrmError::not_found("Lead not found").kind(), ErrorKind::NotFound);
        assert_eq!(
            CrmError::invalid_argument("bad type").kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            CrmError::from(StoreError::Rejected("boom".into())).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_client_errors_display_message_verbatim() {
        assert_eq!(CrmError::not_found("Lead not found").to_string(), "Lead not found");
    }
}
