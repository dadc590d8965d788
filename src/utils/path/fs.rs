//! Filesystem path normalization.

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Lexical normalization if already absolute
/// - Join with current directory if relative
///
/// # Example
/// ```ignore
/// let abs = normalize_path(Path::new("./public"));
/// ```
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            normalize_lexically(path)
        } else {
            std::env::current_dir().map_or_else(
                |_| path.to_path_buf(),
                |cwd| normalize_lexically(&cwd.join(path)),
            )
        }
    })
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// Symlinks are left alone, so `normalize_lexically(p) == p` for any
/// absolute path without dot components. `..` at the root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                // Only pop real names; never climb above a root or prefix
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push(comp);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Resolve symlinks in the longest existing prefix of `path`.
///
/// The missing tail is appended unchanged, so a destination that does not
/// exist yet still compares against its real parent.
pub fn canonicalize_existing(path: &Path) -> PathBuf {
    let mut tail = Vec::new();
    let mut current = path;
    loop {
        if let Ok(real) = current.canonicalize() {
            return tail.iter().rev().fold(real, |acc, name| acc.join(name));
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name);
                current = parent;
            }
            _ => return normalize_lexically(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let path = Path::new("/absolute/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_relative() {
        let path = Path::new("relative/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("relative/path/file.txt"));
    }

    #[test]
    fn test_canonicalize_existing_keeps_missing_tail() {
        let dir = tempfile::TempDir::new().unwrap();
        let real = dir.path().canonicalize().unwrap();
        assert_eq!(
            canonicalize_existing(&dir.path().join("dist/assets")),
            real.join("dist/assets")
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_canonicalize_existing_follows_symlink() {
        let dir = tempfile::TempDir::new().unwrap();
        let real = dir.path().canonicalize().unwrap();
        std::fs::create_dir_all(real.join("site")).unwrap();
        std::os::unix::fs::symlink(real.join("site"), real.join("link")).unwrap();

        assert_eq!(canonicalize_existing(&real.join("link/dist")), real.join("site/dist"));
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/site/./src/../custom")),
            PathBuf::from("/site/custom")
        );
        assert_eq!(
            normalize_lexically(Path::new("/site/custom/")),
            PathBuf::from("/site/custom")
        );
        assert_eq!(normalize_lexically(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize_lexically(Path::new("../a")), PathBuf::from("../a"));
    }
}
