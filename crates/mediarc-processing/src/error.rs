//! Error types for the ingest and deletion services.
//!
//! The taxonomy distinguishes errors the caller can fix (validation), errors
//! that require a resubmit (processing), and errors worth retrying as-is
//! (storage). Nothing is silently swallowed; `client_message` controls what
//! leaves the subsystem.

use crate::validator::ValidationError;
use mediarc_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Rejected before any I/O; reported verbatim to the caller.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Decode or encode failure; aborts the current file with no partial record.
    #[error("Media processing failed: {0}")]
    Processing(String),

    /// Backend unreachable, auth failure, or write denial; retryable.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl MediaError {
    /// Whether the caller may retry the operation unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MediaError::Storage(_))
    }

    /// Client-facing message. Processing detail never leaks; validation
    /// errors are reported verbatim.
    pub fn client_message(&self) -> String {
        match self {
            MediaError::Validation(e) => e.to_string(),
            MediaError::Processing(_) => "Could not process media".to_string(),
            MediaError::Storage(_) => "Storage operation failed, retry later".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryability() {
        let err = MediaError::Storage(StorageError::UploadFailed("down".to_string()));
        assert!(err.is_retryable());

        let err = MediaError::Validation(ValidationError::EmptyFile);
        assert!(!err.is_retryable());

        let err = MediaError::Processing("decode failed".to_string());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_processing_detail_not_leaked() {
        let err = MediaError::Processing("panic in decoder at byte 1234".to_string());
        assert_eq!(err.client_message(), "Could not process media");
    }

    #[test]
    fn test_validation_reported_verbatim() {
        let err = MediaError::Validation(ValidationError::FileTooLarge {
            size: 100,
            max: 50,
        });
        assert!(err.client_message().contains("100"));
        assert!(err.client_message().contains("50"));
    }
}
