//! List/query filters for media records.
//!
//! The metadata store backing listings lives outside this subsystem; these
//! types define the filter contract and the reference matching semantics a
//! store must honor. `MediaPage::from_records` applies them in memory.

use serde::{Deserialize, Serialize};

use super::media::{MediaKind, MediaRecord};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Filters for listing media records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaQuery {
    pub kind: Option<MediaKind>,
    pub folder: Option<String>,
    /// Free-text search over folder and original URL.
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl MediaQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.page_size())
    }

    /// Whether a record satisfies every filter in this query.
    pub fn matches(&self, record: &MediaRecord) -> bool {
        if let Some(kind) = self.kind {
            if record.kind != kind {
                return false;
            }
        }

        if let Some(folder) = &self.folder {
            if record.folder.as_deref() != Some(folder.as_str()) {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let folder_hit = record
                .folder
                .as_deref()
                .is_some_and(|f| f.to_lowercase().contains(&needle));
            let url_hit = record.original_url.to_lowercase().contains(&needle);
            if !folder_hit && !url_hit {
                return false;
            }
        }

        true
    }
}

/// One page of media records plus totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaPage {
    pub items: Vec<MediaRecord>,
    pub total: u64,
    pub page_count: u64,
}

impl MediaPage {
    /// Filter and paginate records in memory.
    pub fn from_records(records: &[MediaRecord], query: &MediaQuery) -> Self {
        let matched: Vec<&MediaRecord> = records.iter().filter(|r| query.matches(r)).collect();
        let total = matched.len() as u64;
        let page_size = u64::from(query.page_size());
        let page_count = total.div_ceil(page_size);

        let items = matched
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.page_size() as usize)
            .cloned()
            .collect();

        MediaPage {
            items,
            total,
            page_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::{VariantMap, VariantSet};

    fn image_record(folder: Option<&str>, url: &str) -> MediaRecord {
        MediaRecord {
            id: None,
            kind: MediaKind::Image,
            folder: folder.map(String::from),
            original_url: url.to_string(),
            variants: VariantSet::Image {
                variants: VariantMap {
                    thumb: String::new(),
                    sm: String::new(),
                    md: String::new(),
                    lg: String::new(),
                },
            },
            poster_url: None,
            mime: "image/jpeg".to_string(),
            size: 1,
            width: Some(1),
            height: Some(1),
            duration: None,
            created_at: None,
        }
    }

    fn video_record(url: &str) -> MediaRecord {
        MediaRecord {
            kind: MediaKind::Video,
            variants: VariantSet::Video { poster: None },
            width: None,
            height: None,
            mime: "video/mp4".to_string(),
            ..image_record(None, url)
        }
    }

    #[test]
    fn test_kind_filter() {
        let records = vec![
            image_record(None, "http://cdn/a.jpg"),
            video_record("http://cdn/b.mp4"),
        ];
        let query = MediaQuery {
            kind: Some(MediaKind::Video),
            ..Default::default()
        };
        let page = MediaPage::from_records(&records, &query);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].kind, MediaKind::Video);
    }

    #[test]
    fn test_folder_filter_is_exact() {
        let records = vec![
            image_record(Some("services"), "http://cdn/a.jpg"),
            image_record(Some("services/icons"), "http://cdn/b.jpg"),
        ];
        let query = MediaQuery {
            folder: Some("services".to_string()),
            ..Default::default()
        };
        let page = MediaPage::from_records(&records, &query);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_search_covers_folder_and_url() {
        let records = vec![
            image_record(Some("team"), "http://cdn/media/team/a/original.jpg"),
            image_record(None, "http://cdn/media/banner/original.png"),
        ];
        let query = MediaQuery {
            search: Some("BANNER".to_string()),
            ..Default::default()
        };
        let page = MediaPage::from_records(&records, &query);
        assert_eq!(page.total, 1);
        assert!(page.items[0].original_url.contains("banner"));
    }

    #[test]
    fn test_pagination_counts() {
        let records: Vec<MediaRecord> = (0..45)
            .map(|i| image_record(None, &format!("http://cdn/{i}.jpg")))
            .collect();
        let query = MediaQuery {
            page: Some(3),
            page_size: Some(20),
            ..Default::default()
        };
        let page = MediaPage::from_records(&records, &query);
        assert_eq!(page.total, 45);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn test_page_size_clamped() {
        let query = MediaQuery {
            page_size: Some(10_000),
            ..Default::default()
        };
        assert_eq!(query.page_size(), MAX_PAGE_SIZE);
        assert_eq!(MediaQuery::default().page(), 1);
    }
}
