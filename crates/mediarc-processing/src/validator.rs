use mediarc_core::MediaKind;

/// Accepted image MIME types.
pub const IMAGE_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Accepted video MIME types.
pub const VIDEO_CONTENT_TYPES: [&str; 1] = ["video/mp4"];

/// Common validation errors for media uploads
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Unsupported media type: {content_type}")]
    UnsupportedMediaType { content_type: String },

    #[error("Too many files: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("Poster must be an image: {content_type}")]
    InvalidPoster { content_type: String },

    #[error("Empty file")]
    EmptyFile,

    #[error("Empty batch")]
    EmptyBatch,
}

/// Classify a declared MIME type against the whitelist.
pub fn classify(content_type: &str) -> Option<MediaKind> {
    let normalized = content_type.to_lowercase();
    if IMAGE_CONTENT_TYPES.contains(&normalized.as_str()) {
        Some(MediaKind::Image)
    } else if VIDEO_CONTENT_TYPES.contains(&normalized.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Upload validator
///
/// Enforces the MIME whitelist plus the per-file and per-batch ceilings.
/// Runs before any byte is read for processing and before any storage write,
/// and a single failure rejects the entire batch.
pub struct UploadValidator {
    max_file_bytes: usize,
    max_batch_files: usize,
}

impl UploadValidator {
    pub fn new(max_file_bytes: usize, max_batch_files: usize) -> Self {
        Self {
            max_file_bytes,
            max_batch_files,
        }
    }

    /// Validate one file's declared type and size.
    pub fn validate_file(
        &self,
        content_type: &str,
        size: usize,
    ) -> Result<MediaKind, ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_bytes {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_bytes,
            });
        }

        classify(content_type).ok_or_else(|| ValidationError::UnsupportedMediaType {
            content_type: content_type.to_string(),
        })
    }

    /// Validate the batch file count.
    pub fn validate_batch_size(&self, count: usize) -> Result<(), ValidationError> {
        if count == 0 {
            return Err(ValidationError::EmptyBatch);
        }

        if count > self.max_batch_files {
            return Err(ValidationError::TooManyFiles {
                count,
                max: self.max_batch_files,
            });
        }

        Ok(())
    }

    /// Validate a supplied poster still: must be an accepted image type
    /// within the per-file ceiling.
    pub fn validate_poster(&self, content_type: &str, size: usize) -> Result<(), ValidationError> {
        match self.validate_file(content_type, size)? {
            MediaKind::Image => Ok(()),
            MediaKind::Video => Err(ValidationError::InvalidPoster {
                content_type: content_type.to_string(),
            }),
        }
    }
}
