//! ID and stored-path utilities.
//!
//! Document ids are case-sensitive and used verbatim; these helpers only
//! derive a fallback id from a file name and normalise stored paths so that
//! origin lookup by path behaves the same on every platform.

use std::path::Path;

/// Compute a fallback ID from a file path's stem.
///
/// The stem is trimmed but otherwise kept as-is, so `PRD-AUTH.md` yields
/// `PRD-AUTH`. Returns `None` if the path has no usable stem.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use trellis_core::util::ids::id_from_path;
///
/// assert_eq!(
///     id_from_path(Path::new("/docs/product/PRD-AUTH.md")),
///     Some("PRD-AUTH".to_string())
/// );
/// assert_eq!(id_from_path(Path::new("/")), None);
/// ```
pub fn id_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Normalise a stored path: `/` separators, no leading `./`, no empty
/// segments.
///
/// # Examples
///
/// ```
/// use trellis_core::util::ids::normalize_path;
///
/// assert_eq!(normalize_path("./product\\auth.md"), "product/auth.md");
/// assert_eq!(normalize_path("a//b/"), "a/b");
/// ```
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether `path` ends with `suffix` on a path-component boundary.
///
/// Both sides are normalised first. An empty suffix never matches.
///
/// # Examples
///
/// ```
/// use trellis_core::util::ids::path_has_suffix;
///
/// assert!(path_has_suffix("docs/product/auth.md", "product/auth.md"));
/// assert!(path_has_suffix("docs/product/auth.md", "auth.md"));
/// assert!(!path_has_suffix("docs/product/oauth.md", "auth.md"));
/// ```
pub fn path_has_suffix(path: &str, suffix: &str) -> bool {
    let path = normalize_path(path);
    let suffix = normalize_path(suffix);
    if suffix.is_empty() {
        return false;
    }
    if path == suffix {
        return true;
    }
    path.strip_suffix(&suffix)
        .is_some_and(|head| head.ends_with('/'))
}
