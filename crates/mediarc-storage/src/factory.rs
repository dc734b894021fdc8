use crate::{LocalStorage, S3Storage, StorageBackend, StorageError, StorageProvider, StorageResult};
use mediarc_core::MediaConfig;
use std::sync::Arc;

/// Create a storage backend based on configuration.
///
/// This is the single place configuration becomes a backend; the result is
/// injected into services at construction time so processing and deletion
/// stay backend-agnostic.
pub async fn create_storage(config: &MediaConfig) -> StorageResult<Arc<dyn StorageProvider>> {
    match config.storage_backend {
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket
                .clone()
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config.s3_region.clone().ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;

            // Custom endpoints default to path-style addressing
            let force_path_style = config
                .s3_force_path_style
                .or_else(|| config.s3_endpoint.as_ref().map(|_| true));

            let storage = S3Storage::new(
                bucket,
                region,
                config.s3_endpoint.clone(),
                config.s3_public_base_url.clone(),
                force_path_style,
            )
            .await?;
            Ok(Arc::new(storage))
        }

        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.local_storage_base_url.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_local_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = MediaConfig {
            environment: "development".to_string(),
            storage_backend: StorageBackend::Local,
            local_storage_path: Some(dir.path().to_string_lossy().to_string()),
            local_storage_base_url: Some("http://localhost:4000/files".to_string()),
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            s3_public_base_url: None,
            s3_force_path_style: None,
            max_file_size_bytes: 20 * 1024 * 1024,
            max_files_per_batch: 10,
        };

        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }

    #[tokio::test]
    async fn test_create_s3_storage_requires_bucket() {
        let config = MediaConfig {
            environment: "development".to_string(),
            storage_backend: StorageBackend::S3,
            local_storage_path: None,
            local_storage_base_url: None,
            s3_bucket: None,
            s3_region: Some("us-east-1".to_string()),
            s3_endpoint: None,
            s3_public_base_url: None,
            s3_force_path_style: None,
            max_file_size_bytes: 20 * 1024 * 1024,
            max_files_per_batch: 10,
        };

        let result = create_storage(&config).await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }
}
