//! Media lifecycle operations: tearing down storage artifacts for a record.
//!
//! Deletion is a two-phase protocol with storage-first ordering: this
//! orchestrator removes every backend object a record references, and only a
//! successful run yields the [`Deleted`] token the caller must hold before
//! removing the metadata row. A failed run keeps the row so no metadata ever
//! points at missing bytes; the converse (orphaned bytes) is an acceptable,
//! cleanable leak.

use futures::stream::{self, StreamExt};
use mediarc_core::{Deleted, MediaRecord};
use mediarc_storage::{StorageProvider, StorageResult};
use std::sync::Arc;

use crate::error::MediaError;

/// Removal fan-out width for one record's artifacts.
const REMOVE_CONCURRENCY: usize = 8;

/// Orchestrates removal of every storage object a record references.
pub struct DeletionOrchestrator {
    storage: Arc<dyn StorageProvider>,
}

impl DeletionOrchestrator {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }

    /// Remove the original, every ladder rung (nested poster rungs for
    /// videos), and the poster URL when distinct.
    ///
    /// Removals run concurrently and already-absent objects count as
    /// removed, so a retried delete converges. Every removal is attempted
    /// even when some fail; any genuine backend failure then fails the call
    /// and no `Deleted` token is produced.
    pub async fn delete(&self, record: &MediaRecord) -> Result<Deleted, MediaError> {
        let urls = record.artifact_urls();
        let total = urls.len();

        let results: Vec<StorageResult<()>> = stream::iter(urls)
            .map(|url| {
                let storage = self.storage.clone();
                async move { storage.remove(url).await }
            })
            .buffer_unordered(REMOVE_CONCURRENCY)
            .collect()
            .await;

        let mut failed = 0usize;
        let mut first_error = None;
        for result in results {
            if let Err(e) = result {
                failed += 1;
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        if let Some(e) = first_error {
            tracing::error!(
                error = %e,
                failed,
                total,
                "Media delete left artifacts in storage, metadata row must be kept"
            );
            return Err(MediaError::Storage(e));
        }

        tracing::info!(objects_removed = total, "Media artifacts removed from storage");
        Ok(Deleted::new(total))
    }
}
