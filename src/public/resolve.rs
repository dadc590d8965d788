//! Turning user-supplied path strings into existing absolute directories.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::utils::path::normalize_lexically;

use super::option::{PublicOption, ResolvedOption};

/// Path resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("invalid path `{0}`")]
    InvalidPath(String),

    #[error("path does not exist: `{}`", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: `{}`", .0.display())]
    NotADirectory(PathBuf),
}

/// Resolve `path` to an existing absolute directory.
///
/// - `file:` URLs are converted to filesystem paths
/// - `~` expands to the home directory
/// - relative paths are joined onto `base`
/// - a path with an extension is taken to name a file and replaced by its
///   parent directory
///
/// Never returns a path that is not an existing directory.
pub fn resolve_directory(base: &Path, path: &str) -> Result<PathBuf, ResolveError> {
    if path.is_empty() {
        return Err(ResolveError::InvalidPath(path.into()));
    }

    let raw = if path.starts_with("file:") {
        file_url_to_path(path)?
    } else {
        PathBuf::from(shellexpand::tilde(path).as_ref())
    };

    let absolute = if raw.is_absolute() {
        raw
    } else {
        base.join(raw)
    };
    let mut resolved = normalize_lexically(&absolute);

    if resolved.extension().is_some_and(|ext| !ext.is_empty())
        && let Some(parent) = resolved.parent()
    {
        resolved = parent.to_path_buf();
    }

    if !resolved.exists() {
        return Err(ResolveError::NotFound(resolved));
    }
    if !resolved.is_dir() {
        return Err(ResolveError::NotADirectory(resolved));
    }

    Ok(resolved)
}

fn file_url_to_path(path: &str) -> Result<PathBuf, ResolveError> {
    url::Url::parse(path)
        .ok()
        .and_then(|url| url.to_file_path().ok())
        .ok_or_else(|| ResolveError::InvalidPath(path.into()))
}

/// Resolve a parsed option against the project root.
///
/// `cwd` resolves against `root` (unless absolute), then `dir` resolves
/// against the resolved `cwd`.
pub fn resolve_option(
    index: usize,
    option: &PublicOption,
    root: &Path,
) -> Result<ResolvedOption, ResolveError> {
    let working_directory = resolve_directory(root, &option.cwd)?;
    let directory = resolve_directory(&working_directory, &option.dir)?;

    Ok(ResolvedOption {
        index,
        directory,
        working_directory,
        copy_phase: option.copy,
        log_level: option.log,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::public::option::{CopyPhase, LogLevel};
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("custom/img")).unwrap();
        fs::create_dir_all(dir.path().join("src/custom")).unwrap();
        fs::write(dir.path().join("custom/logo.svg"), "<svg></svg>").unwrap();
        dir
    }

    #[test]
    fn test_absolute_existing_is_identity() {
        let dir = site();
        let abs = dir.path().join("custom");
        let resolved = resolve_directory(Path::new("/elsewhere"), abs.to_str().unwrap()).unwrap();
        assert_eq!(resolved, abs);
    }

    #[test]
    fn test_relative_joins_base() {
        let dir = site();
        let resolved = resolve_directory(dir.path(), "custom/img").unwrap();
        assert_eq!(resolved, dir.path().join("custom/img"));

        let resolved = resolve_directory(&dir.path().join("src"), "../custom").unwrap();
        assert_eq!(resolved, dir.path().join("custom"));
    }

    #[test]
    fn test_file_path_becomes_parent() {
        let dir = site();
        let resolved = resolve_directory(dir.path(), "custom/logo.svg").unwrap();
        assert_eq!(resolved, dir.path().join("custom"));
    }

    #[test]
    fn test_missing_file_parent_still_resolves() {
        // Extension heuristic: the file itself need not exist
        let dir = site();
        let resolved = resolve_directory(dir.path(), "custom/missing.png").unwrap();
        assert_eq!(resolved, dir.path().join("custom"));
    }

    #[test]
    fn test_file_url() {
        let dir = site();
        let url = url::Url::from_directory_path(dir.path().join("custom")).unwrap();
        let resolved = resolve_directory(Path::new("/"), url.as_str()).unwrap();
        assert_eq!(resolved, dir.path().join("custom"));
    }

    #[test]
    #[cfg(unix)]
    fn test_file_url_with_host_is_invalid() {
        assert_eq!(
            resolve_directory(Path::new("/"), "file://remote-host/share"),
            Err(ResolveError::InvalidPath("file://remote-host/share".into()))
        );
    }

    #[test]
    fn test_empty_path_is_invalid() {
        assert_eq!(
            resolve_directory(Path::new("/"), ""),
            Err(ResolveError::InvalidPath(String::new()))
        );
    }

    #[test]
    fn test_not_found_never_returns_path() {
        let dir = site();
        let err = resolve_directory(dir.path(), "does-not-exist").unwrap_err();
        assert_eq!(err, ResolveError::NotFound(dir.path().join("does-not-exist")));
    }

    #[test]
    fn test_extensionless_file_is_not_a_directory() {
        let dir = site();
        fs::write(dir.path().join("LICENSE"), "MIT").unwrap();
        assert_eq!(
            resolve_directory(dir.path(), "LICENSE"),
            Err(ResolveError::NotADirectory(dir.path().join("LICENSE")))
        );
    }

    #[test]
    fn test_file_parent_that_is_a_file() {
        let dir = site();
        fs::write(dir.path().join("README"), "readme").unwrap();
        assert!(matches!(
            resolve_directory(dir.path(), "README/logo.svg"),
            Err(ResolveError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_resolve_option_with_cwd() {
        let dir = site();
        let mut option = PublicOption::new("custom");
        option.cwd = "src".into();
        option.copy = CopyPhase::After;
        option.log = LogLevel::Verbose;

        let resolved = resolve_option(3, &option, dir.path()).unwrap();
        assert_eq!(resolved.index, 3);
        assert_eq!(resolved.working_directory, dir.path().join("src"));
        assert_eq!(resolved.directory, dir.path().join("src/custom"));
        assert_eq!(resolved.copy_phase, CopyPhase::After);
        assert_eq!(resolved.log_level, LogLevel::Verbose);
    }

    #[test]
    fn test_resolve_option_default_cwd_is_root() {
        let dir = site();
        let resolved = resolve_option(0, &PublicOption::new("custom"), dir.path()).unwrap();
        assert_eq!(resolved.working_directory, dir.path().to_path_buf());
        assert_eq!(resolved.directory, dir.path().join("custom"));
    }

    #[test]
    fn test_resolve_option_missing_cwd() {
        let dir = site();
        let mut option = PublicOption::new("custom");
        option.cwd = "nope".into();
        assert!(matches!(
            resolve_option(0, &option, dir.path()),
            Err(ResolveError::NotFound(_))
        ));
    }
}
