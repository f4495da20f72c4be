//! Path helpers for the Zellij sandbox.

use std::path::PathBuf;

/// Sandbox mount point of the plugin's private data directory.
pub const SANDBOX_DATA_DIR: &str = "/data";

/// Returns the default data directory holding favorites and trace files.
///
/// ```
/// use bookfinder::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/data"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(SANDBOX_DATA_DIR)
}

/// Expands tilde paths to use the `/host` prefix for the Zellij sandbox.
///
/// ```
/// use bookfinder::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/books"), "/host/books");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Resolves the configured `data_dir` option.
///
/// A blank value disables on-disk persistence and yields `None`.
///
/// ```
/// use bookfinder::infrastructure::resolve_data_dir;
/// use std::path::PathBuf;
///
/// assert_eq!(resolve_data_dir("~/.bookfinder"), Some(PathBuf::from("/host/.bookfinder")));
/// assert_eq!(resolve_data_dir("  "), None);
/// ```
#[must_use]
pub fn resolve_data_dir(configured: &str) -> Option<PathBuf> {
    let trimmed = configured.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(expand_tilde(trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_only_touches_leading_home() {
        assert_eq!(expand_tilde("~user/books"), "~user/books");
        assert_eq!(expand_tilde("/data/~/x"), "/data/~/x");
    }

    #[test]
    fn test_resolve_data_dir_defaults() {
        assert_eq!(resolve_data_dir(SANDBOX_DATA_DIR), Some(get_data_dir()));
        assert_eq!(resolve_data_dir(" /tmp/bf "), Some(PathBuf::from("/tmp/bf")));
        assert_eq!(resolve_data_dir(""), None);
    }
}
