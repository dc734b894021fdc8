//! In-memory storage implementation for tests.
//!
//! Backends are injected into the ingest and deletion services, so tests can
//! swap this double in to assert write counts and to simulate an unreachable
//! backend without touching a filesystem or network.

use crate::traits::{strip_url_base, StorageError, StorageProvider, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

const BASE_URL: &str = "https://media.test";

/// In-memory storage backing uploads with a HashMap.
pub struct MemoryStorage {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    backend_type: StorageBackend,
    fail_uploads: AtomicBool,
    fail_removes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            backend_type: StorageBackend::Local,
            fail_uploads: AtomicBool::new(false),
            fail_removes: AtomicBool::new(false),
        }
    }

    pub fn with_backend(backend_type: StorageBackend) -> Self {
        Self {
            backend_type,
            ..Self::new()
        }
    }

    /// Number of stored objects (for zero-write assertions).
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Check if an object exists by key
    pub fn has_object(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    /// Get object bytes (for test assertions)
    pub fn get_object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    /// Make subsequent uploads fail, simulating an unreachable backend.
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent removes fail, simulating an unreachable backend.
    pub fn fail_removes(&self, fail: bool) {
        self.fail_removes.store(fail, Ordering::SeqCst);
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed(
                "storage backend unreachable".to_string(),
            ));
        }
        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(format!("{}/{}", BASE_URL, key))
    }

    async fn remove(&self, key_or_url: &str) -> StorageResult<()> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(StorageError::RemoveFailed(
                "storage backend unreachable".to_string(),
            ));
        }
        let key = self.resolve_key(key_or_url)?;
        // Missing objects are tolerated
        self.objects.lock().unwrap().remove(&key);
        Ok(())
    }

    async fn download(&self, key_or_url: &str) -> StorageResult<Vec<u8>> {
        let key = self.resolve_key(key_or_url)?;
        self.objects
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or(StorageError::NotFound(key))
    }

    async fn exists(&self, key_or_url: &str) -> StorageResult<bool> {
        let key = self.resolve_key(key_or_url)?;
        Ok(self.objects.lock().unwrap().contains_key(&key))
    }

    fn resolve_key(&self, key_or_url: &str) -> StorageResult<String> {
        strip_url_base(key_or_url, BASE_URL)
    }

    fn backend_type(&self) -> StorageBackend {
        self.backend_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_and_remove() {
        let storage = MemoryStorage::new();
        let url = storage
            .upload("media/a/original.png", b"png".to_vec(), "image/png")
            .await
            .unwrap();

        assert_eq!(storage.object_count(), 1);
        assert_eq!(storage.download(&url).await.unwrap(), b"png".to_vec());

        storage.remove(&url).await.unwrap();
        assert_eq!(storage.object_count(), 0);
        // Idempotent
        assert!(storage.remove(&url).await.is_ok());
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let storage = MemoryStorage::new();
        storage.fail_uploads(true);
        assert!(matches!(
            storage.upload("media/a", b"x".to_vec(), "image/png").await,
            Err(StorageError::UploadFailed(_))
        ));

        storage.fail_uploads(false);
        storage.upload("media/a", b"x".to_vec(), "image/png").await.unwrap();

        storage.fail_removes(true);
        assert!(matches!(
            storage.remove("media/a").await,
            Err(StorageError::RemoveFailed(_))
        ));
        assert!(storage.has_object("media/a"));
    }
}
