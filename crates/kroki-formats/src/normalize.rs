//! Input normalization shared by every table lookup.
//!
//! Table keys are stored pre-normalized, so every string coming from the
//! outside world goes through [`normalize`] before it touches a table.

use std::path::is_separator;

/// Normalize a user-supplied name or extension for table lookup.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Extension of the last path component, including the leading dot.
///
/// Returns an empty string when the last component has no dot. A dotfile such
/// as `.puml` is treated as pure extension.
#[must_use]
pub fn file_extension(path: &str) -> &str {
    for (idx, ch) in path.char_indices().rev() {
        if is_separator(ch) {
            break;
        }
        if ch == '.' {
            return &path[idx..];
        }
    }
    ""
}

/// Path with the extension of its last component removed.
pub(crate) fn strip_extension(path: &str) -> &str {
    let extension = file_extension(path);
    &path[..path.len() - extension.len()]
}
