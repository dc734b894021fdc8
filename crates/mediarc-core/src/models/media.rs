use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

/// Media type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl FromStr for MediaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            _ => Err(anyhow::anyhow!("Invalid media kind: {}", s)),
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// Rungs of the fixed variant ladder, ascending by width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantName {
    Thumb,
    Sm,
    Md,
    Lg,
}

impl VariantName {
    /// The full ladder, ascending.
    pub const LADDER: [VariantName; 4] = [
        VariantName::Thumb,
        VariantName::Sm,
        VariantName::Md,
        VariantName::Lg,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VariantName::Thumb => "thumb",
            VariantName::Sm => "sm",
            VariantName::Md => "md",
            VariantName::Lg => "lg",
        }
    }

    /// Width ceiling for this rung in pixels. Sources narrower than the
    /// ceiling are never upscaled.
    pub fn max_width(self) -> u32 {
        match self {
            VariantName::Thumb => 320,
            VariantName::Sm => 640,
            VariantName::Md => 1024,
            VariantName::Lg => 1600,
        }
    }
}

impl Display for VariantName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// URLs for one rendered ladder, one URL per rung.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantMap {
    pub thumb: String,
    pub sm: String,
    pub md: String,
    pub lg: String,
}

impl VariantMap {
    pub fn get(&self, name: VariantName) -> &str {
        match name {
            VariantName::Thumb => &self.thumb,
            VariantName::Sm => &self.sm,
            VariantName::Md => &self.md,
            VariantName::Lg => &self.lg,
        }
    }

    /// All rung URLs in ladder order.
    pub fn urls(&self) -> [&str; 4] {
        [&self.thumb, &self.sm, &self.md, &self.lg]
    }

    /// Largest available rung URL: lg preferred, falling back through
    /// md, sm, thumb.
    pub fn largest(&self) -> &str {
        for url in [&self.lg, &self.md, &self.sm, &self.thumb] {
            if !url.is_empty() {
                return url;
            }
        }
        &self.thumb
    }
}

/// Derived-artifact URLs for one record, discriminated by media kind.
///
/// Images always carry a fully populated ladder; videos carry a nested
/// poster ladder only when a poster still was supplied at ingest time.
/// Consumers pattern-match on the variant rather than probing shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VariantSet {
    Image { variants: VariantMap },
    Video { poster: Option<VariantMap> },
}

impl VariantSet {
    pub fn kind(&self) -> MediaKind {
        match self {
            VariantSet::Image { .. } => MediaKind::Image,
            VariantSet::Video { .. } => MediaKind::Video,
        }
    }
}

/// The durable description of one ingested asset.
///
/// `id` and `created_at` are assigned by the external metadata store at
/// persistence time, never by this subsystem. Every URL on a record returned
/// from ingest corresponds to a confirmed storage write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: Option<Uuid>,
    pub kind: MediaKind,
    pub folder: Option<String>,
    pub original_url: String,
    pub variants: VariantSet,
    pub poster_url: Option<String>,
    pub mime: String,
    pub size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    /// Reserved; the ingest pipeline does not currently populate this.
    pub duration: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl MediaRecord {
    /// Every storage object URL this record references: the original, all
    /// ladder rungs (nested poster rungs for videos), and the poster URL
    /// when it is distinct from the rungs. This is the deletion work-list.
    pub fn artifact_urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = vec![self.original_url.as_str()];
        match &self.variants {
            VariantSet::Image { variants } => urls.extend(variants.urls()),
            VariantSet::Video { poster } => {
                if let Some(poster) = poster {
                    urls.extend(poster.urls());
                }
            }
        }
        if let Some(poster_url) = &self.poster_url {
            if !urls.contains(&poster_url.as_str()) {
                urls.push(poster_url);
            }
        }
        urls
    }
}

/// Proof that every storage object referenced by a record has been removed.
///
/// Deletion is a two-phase protocol with storage-first ordering: the caller
/// must hold a `Deleted` before dropping the metadata row. On failure no
/// token is produced and the row must be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deleted {
    objects_removed: usize,
}

impl Deleted {
    pub fn new(objects_removed: usize) -> Self {
        Self { objects_removed }
    }

    pub fn objects_removed(&self) -> usize {
        self.objects_removed
    }
}
