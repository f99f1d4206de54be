//! Artifact identifiers and paths.
//!
//! The artifact id is the trailing path segment of the input URL,
//! sanitized for safe use in a filesystem path. The same id names both
//! the on-disk zip and the attachment filename sent to the client.

mod sanitize;
mod segment;

pub use sanitize::sanitize_artifact_id;
pub use segment::segment_from_url;

use std::path::{Path, PathBuf};

/// Derives the artifact id for `url`.
///
/// Returns `None` when the URL does not parse, has no path segment, or
/// the segment sanitizes to nothing usable. Callers treat that as a
/// client error rather than inventing a fallback name.
///
/// # Examples
///
/// - `derive_artifact_id("https://example.com/tracks/abc123")` → `Some("abc123")`
/// - `derive_artifact_id("https://example.com/")` → `None`
pub fn derive_artifact_id(url: &str) -> Option<String> {
    let raw = segment_from_url(url)?;
    let id = sanitize_artifact_id(&raw);
    if id.is_empty() || id == "." || id == ".." {
        None
    } else {
        Some(id)
    }
}

/// Path of the zip artifact for `id` inside `temp_dir`.
///
/// The existence check before regeneration and the generation output
/// use this one path, so a leftover artifact is actually found.
pub fn zip_path(temp_dir: &Path, id: &str) -> PathBuf {
    temp_dir.join(format!("{id}.zip"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn derive_from_track_url() {
        assert_eq!(
            derive_artifact_id("https://example.com/tracks/abc123").as_deref(),
            Some("abc123")
        );
        assert_eq!(
            derive_artifact_id("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC").as_deref(),
            Some("4uLU6hMCjMI75M1A2tKUQC")
        );
    }

    #[test]
    fn query_string_is_not_part_of_the_id() {
        assert_eq!(
            derive_artifact_id("https://example.com/track/abc?si=xyz").as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn rejects_root_and_unparseable() {
        assert_eq!(derive_artifact_id("https://example.com/"), None);
        assert_eq!(derive_artifact_id("https://example.com"), None);
        assert_eq!(derive_artifact_id("not a url"), None);
    }

    #[test]
    fn rejects_dot_segments() {
        assert_eq!(derive_artifact_id("https://example.com/a/%2e%2e"), None);
    }

    #[test]
    fn traversal_attempt_is_neutralized() {
        // %2f is a percent-encoded slash inside the final segment.
        let id = derive_artifact_id("https://example.com/x/..%2f..%2fetc").unwrap();
        assert!(!id.contains('/'));
        assert_eq!(zip_path(Path::new("/tmp"), &id).parent(), Some(Path::new("/tmp")));
    }

    #[test]
    fn zip_path_joins_id() {
        assert_eq!(
            zip_path(Path::new("/tmp"), "abc123"),
            Path::new("/tmp/abc123.zip")
        );
    }
}
