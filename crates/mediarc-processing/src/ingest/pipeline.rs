//! Ingest pipeline: validate → render → store → describe.
//!
//! The batch is validated in full before any byte is processed or written.
//! Files are then processed one at a time; within one file the ladder rung
//! writes run concurrently but are all awaited before the record is
//! assembled, so a returned record only ever references confirmed writes.

use std::sync::Arc;

use futures::future::try_join_all;
use mediarc_core::{MediaConfig, MediaKind, MediaRecord, VariantMap, VariantName, VariantSet};
use mediarc_storage::{build_key_base, sanitize_folder, StorageProvider};

use crate::error::MediaError;
use crate::image::encoder::{extension_for_mime, VARIANT_FORMAT_EXT, VARIANT_FORMAT_MIME};
use crate::image::ladder::{render_ladder, RenderedLadder, RenderedVariant};
use crate::validator::UploadValidator;

/// One uploaded file: declared MIME type plus raw bytes.
#[derive(Clone)]
pub struct UploadFile {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Upload ceilings enforced before any processing starts.
#[derive(Debug, Clone, Copy)]
pub struct IngestLimits {
    pub max_file_bytes: usize,
    pub max_batch_files: usize,
}

impl From<&MediaConfig> for IngestLimits {
    fn from(config: &MediaConfig) -> Self {
        Self {
            max_file_bytes: config.max_file_size_bytes,
            max_batch_files: config.max_files_per_batch,
        }
    }
}

/// Media ingest service
///
/// The storage backend is injected once at construction; the pipeline never
/// consults process configuration itself.
pub struct MediaIngest {
    storage: Arc<dyn StorageProvider>,
    validator: UploadValidator,
}

impl MediaIngest {
    pub fn new(storage: Arc<dyn StorageProvider>, limits: IngestLimits) -> Self {
        Self {
            storage,
            validator: UploadValidator::new(limits.max_file_bytes, limits.max_batch_files),
        }
    }

    /// Ingest a batch of uploaded files under an optional logical folder.
    ///
    /// A poster still, when supplied, is honored only for a single-file
    /// video upload; it runs through the same ladder as a regular image.
    /// Any validation failure rejects the entire batch with zero writes.
    /// Returns one record per input file, in input order.
    pub async fn ingest_batch(
        &self,
        files: Vec<UploadFile>,
        folder: Option<&str>,
        poster: Option<UploadFile>,
    ) -> Result<Vec<MediaRecord>, MediaError> {
        // Whole-batch validation up front: nothing is written until every
        // file (and the poster) has passed.
        self.validator.validate_batch_size(files.len())?;
        let mut kinds = Vec::with_capacity(files.len());
        for file in &files {
            kinds.push(
                self.validator
                    .validate_file(&file.content_type, file.data.len())?,
            );
        }
        if let Some(poster) = &poster {
            self.validator
                .validate_poster(&poster.content_type, poster.data.len())?;
        }

        let folder = folder.and_then(sanitize_folder);
        let mut poster = if files.len() == 1 { poster } else { None };

        let mut records = Vec::with_capacity(files.len());
        for (file, kind) in files.into_iter().zip(kinds) {
            let record = match kind {
                MediaKind::Image => self.ingest_image(file, folder.as_deref()).await?,
                MediaKind::Video => {
                    self.ingest_video(file, poster.take(), folder.as_deref())
                        .await?
                }
            };
            records.push(record);
        }

        Ok(records)
    }

    async fn ingest_image(
        &self,
        file: UploadFile,
        folder: Option<&str>,
    ) -> Result<MediaRecord, MediaError> {
        let key_base = build_key_base(folder);
        let size = file.data.len() as i64;
        let extension = extension_for_mime(&file.content_type).unwrap_or("bin");

        // Render the full ladder before the first write so a decode or
        // encode failure leaves storage untouched.
        let ladder = self.render(file.data.clone()).await?;

        let original_key = format!("{}/original.{}", key_base, extension);
        let original_url = self
            .storage
            .upload(&original_key, file.data, &file.content_type)
            .await?;

        let variants = self
            .store_ladder(&key_base, "", ladder.variants)
            .await?;

        tracing::info!(
            key_base = %key_base,
            size_bytes = size,
            width = ladder.width,
            height = ladder.height,
            "Image ingested"
        );

        Ok(MediaRecord {
            id: None,
            kind: MediaKind::Image,
            folder: folder.map(String::from),
            original_url,
            variants: VariantSet::Image { variants },
            poster_url: None,
            mime: file.content_type,
            size,
            width: Some(ladder.width as i32),
            height: Some(ladder.height as i32),
            duration: None,
            created_at: None,
        })
    }

    async fn ingest_video(
        &self,
        file: UploadFile,
        poster: Option<UploadFile>,
        folder: Option<&str>,
    ) -> Result<MediaRecord, MediaError> {
        let key_base = build_key_base(folder);
        let size = file.data.len() as i64;
        let extension = extension_for_mime(&file.content_type).unwrap_or("bin");

        // No server-side frame extraction: poster rungs come only from the
        // separately supplied still, rendered before the first write.
        let poster_ladder = match poster {
            Some(poster) => Some(self.render(poster.data).await?),
            None => None,
        };

        let original_key = format!("{}/original.{}", key_base, extension);
        let original_url = self
            .storage
            .upload(&original_key, file.data, &file.content_type)
            .await?;

        let (poster_map, poster_url) = match poster_ladder {
            Some(ladder) => {
                let map = self
                    .store_ladder(&key_base, "poster-", ladder.variants)
                    .await?;
                let poster_url = map.largest().to_string();
                (Some(map), Some(poster_url))
            }
            None => (None, None),
        };

        tracing::info!(
            key_base = %key_base,
            size_bytes = size,
            has_poster = poster_url.is_some(),
            "Video ingested"
        );

        Ok(MediaRecord {
            id: None,
            kind: MediaKind::Video,
            folder: folder.map(String::from),
            original_url,
            variants: VariantSet::Video { poster: poster_map },
            poster_url,
            mime: file.content_type,
            size,
            width: None,
            height: None,
            duration: None,
            created_at: None,
        })
    }

    async fn render(&self, data: Vec<u8>) -> Result<RenderedLadder, MediaError> {
        render_ladder(data).await.map_err(|e| {
            tracing::warn!(error = %e, "Image ladder rendering failed");
            MediaError::Processing(e.to_string())
        })
    }

    /// Write every rung buffer concurrently under the key base and await all
    /// writes before returning the URL map.
    async fn store_ladder(
        &self,
        key_base: &str,
        prefix: &str,
        variants: Vec<RenderedVariant>,
    ) -> Result<VariantMap, MediaError> {
        let uploads = variants.into_iter().map(|variant| {
            let key = format!(
                "{}/{}{}.{}",
                key_base, prefix, variant.name, VARIANT_FORMAT_EXT
            );
            let storage = self.storage.clone();
            async move {
                let url = storage
                    .upload(&key, variant.data, VARIANT_FORMAT_MIME)
                    .await?;
                Ok::<(VariantName, String), MediaError>((variant.name, url))
            }
        });

        let mut map = VariantMap {
            thumb: String::new(),
            sm: String::new(),
            md: String::new(),
            lg: String::new(),
        };
        for (name, url) in try_join_all(uploads).await? {
            match name {
                VariantName::Thumb => map.thumb = url,
                VariantName::Sm => map.sm = url,
                VariantName::Md => map.md = url,
                VariantName::Lg => map.lg = url,
            }
        }

        Ok(map)
    }
}
