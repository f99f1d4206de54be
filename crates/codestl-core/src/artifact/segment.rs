//! Trailing path segment extraction from the input URL.

/// Extracts the last path segment of `url`, the raw artifact id candidate.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
/// Query and fragment are ignored; dot segments are normalized away by
/// the URL parser before we ever see them.
pub fn segment_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}
