//! Shared key generation for storage backends.
//!
//! Key base format: `media/{folder}/{uuid}` with a sanitized folder, or
//! `media/{uuid}` without one. Every object derived from one upload lives
//! under its key base (`original.jpg`, `thumb.webp`, ...).

use uuid::Uuid;

/// Sanitize a caller-supplied folder into a safe path fragment.
///
/// Lowercases, keeps only `[a-z0-9/_-]`, collapses repeated separators, and
/// strips leading/trailing separators. Returns `None` when nothing safe
/// survives. Traversal is impossible because `.` never survives.
pub fn sanitize_folder(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut prev_sep = true;
    for c in raw.to_lowercase().chars() {
        match c {
            'a'..='z' | '0'..='9' | '_' | '-' => {
                out.push(c);
                prev_sep = false;
            }
            '/' => {
                if !prev_sep {
                    out.push('/');
                    prev_sep = true;
                }
            }
            _ => {}
        }
    }

    let trimmed = out.trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Generate a fresh, collision-resistant key base for one upload.
///
/// The random v4 UUID leaf makes two calls never produce the same base.
pub fn build_key_base(folder: Option<&str>) -> String {
    let id = Uuid::new_v4();
    match folder.and_then(sanitize_folder) {
        Some(folder) => format!("media/{}/{}", folder, id),
        None => format!("media/{}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_folder_lowercases_and_filters() {
        assert_eq!(sanitize_folder("Services"), Some("services".to_string()));
        assert_eq!(
            sanitize_folder("Team Photos!"),
            Some("teamphotos".to_string())
        );
        assert_eq!(sanitize_folder("a_b-c/d"), Some("a_b-c/d".to_string()));
    }

    #[test]
    fn test_sanitize_folder_blocks_traversal() {
        assert_eq!(sanitize_folder("../../etc"), Some("etc".to_string()));
        assert_eq!(sanitize_folder("/abs/path"), Some("abs/path".to_string()));
        assert_eq!(sanitize_folder("a/../b"), Some("a/b".to_string()));
    }

    #[test]
    fn test_sanitize_folder_collapses_separators() {
        assert_eq!(sanitize_folder("a//b///c/"), Some("a/b/c".to_string()));
    }

    #[test]
    fn test_sanitize_folder_empty_results() {
        assert_eq!(sanitize_folder(""), None);
        assert_eq!(sanitize_folder("..."), None);
        assert_eq!(sanitize_folder("///"), None);
    }

    #[test]
    fn test_build_key_base_is_unique() {
        let a = build_key_base(Some("services"));
        let b = build_key_base(Some("services"));
        assert!(a.starts_with("media/services/"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_build_key_base_without_folder() {
        let key = build_key_base(None);
        assert!(key.starts_with("media/"));
        assert_eq!(key.matches('/').count(), 1);
    }
}
