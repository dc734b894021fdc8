//! Storage abstraction trait
//!
//! This module defines the StorageProvider trait that all storage backends
//! must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Remove failed: {0}")]
    RemoveFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3-compatible, local filesystem, in-memory) must
/// implement this trait. Backend selection happens once per process via
/// [`crate::factory::create_storage`]; callers hold an `Arc<dyn
/// StorageProvider>` and never read backend configuration themselves.
///
/// Operations that take `key_or_url` accept either a bare storage key or a
/// public URL previously returned by `upload`; URLs are resolved back to
/// keys via [`StorageProvider::resolve_key`]. `remove` is idempotent: an
/// object that is already gone is a non-error, while genuine I/O or auth
/// failures surface as fatal for that call.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Upload bytes under a key and return the publicly resolvable URL.
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String>;

    /// Remove an object. Missing objects are tolerated.
    async fn remove(&self, key_or_url: &str) -> StorageResult<()>;

    /// Download an object's bytes.
    async fn download(&self, key_or_url: &str) -> StorageResult<Vec<u8>>;

    /// Check whether an object exists.
    async fn exists(&self, key_or_url: &str) -> StorageResult<bool>;

    /// Resolve a public URL back to its storage key. Bare keys pass through
    /// unchanged; URLs that do not belong to this backend are an error.
    fn resolve_key(&self, key_or_url: &str) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Strip a backend's public URL base from `key_or_url`, passing bare keys
/// through. Shared by all backends so URL→key resolution stays uniform.
pub(crate) fn strip_url_base(key_or_url: &str, base_url: &str) -> StorageResult<String> {
    if !key_or_url.contains("://") {
        return Ok(key_or_url.to_string());
    }

    let base = base_url.trim_end_matches('/');
    key_or_url
        .strip_prefix(base)
        // Require a path boundary so a base of ".../files" never claims
        // ".../files2/..."
        .and_then(|rest| rest.strip_prefix('/'))
        .map(|key| key.to_string())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            StorageError::InvalidKey(format!(
                "URL does not belong to this storage backend: {}",
                key_or_url
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_url_base_passes_bare_keys() {
        let key = strip_url_base("media/a/original.jpg", "http://localhost:4000/media").unwrap();
        assert_eq!(key, "media/a/original.jpg");
    }

    #[test]
    fn test_strip_url_base_strips_base() {
        let key = strip_url_base(
            "http://localhost:4000/files/media/a/thumb.webp",
            "http://localhost:4000/files/",
        )
        .unwrap();
        assert_eq!(key, "media/a/thumb.webp");
    }

    #[test]
    fn test_strip_url_base_rejects_foreign_urls() {
        let result = strip_url_base("https://elsewhere.test/media/a.jpg", "http://localhost:4000");
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_strip_url_base_requires_path_boundary() {
        let result = strip_url_base(
            "http://localhost:4000/files2/media/a.jpg",
            "http://localhost:4000/files",
        );
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
