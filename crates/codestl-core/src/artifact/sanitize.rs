//! Artifact id sanitization.
//!
//! The id ends up in a filesystem path and in a Content-Disposition
//! header, so anything that could break either is replaced.

/// Longest id we accept; leaves room for the `.zip` suffix under NAME_MAX.
const ID_MAX: usize = 128;

/// Sanitizes a raw URL segment into a filesystem-safe artifact id.
///
/// - Replaces path separators, NUL, control chars, whitespace, and `"`
///   with `_`, collapsing runs into a single `_`
/// - Trims leading/trailing dots, spaces, and underscores
/// - Caps length at 128 bytes (on a char boundary)
pub fn sanitize_artifact_id(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_underscore = false;

    for c in raw.chars() {
        let keep = !(c == '\0'
            || c == '/'
            || c == '\\'
            || c == '"'
            || c.is_control()
            || c.is_whitespace());
        if keep {
            out.push(c);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_' || c == ' ');

    if trimmed.len() > ID_MAX {
        let mut take = ID_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}
