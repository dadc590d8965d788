//! Serve a directory as-is (native public dir, build output).

use anyhow::Result;
use std::fs::File;
use std::path::{Path, PathBuf};
use tiny_http::Request;

use super::{Handler, Outcome, response};
use crate::utils::path::request_path;

/// Handler serving files under `root`, with `index.html` for directories.
pub struct StaticDir {
    name: String,
    root: PathBuf,
}

impl StaticDir {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Map a request URL to an existing file under the root.
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        resolve_path(url, &self.root)
    }
}

impl Handler for StaticDir {
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, request: Request) -> Result<Outcome> {
        let Some(path) = self.resolve(request.url()) else {
            return Ok(Outcome::Next(request));
        };
        match File::open(&path) {
            Ok(file) => response::respond_file(request, file, &path).map(|()| Outcome::Handled),
            Err(_) => Ok(Outcome::Next(request)),
        }
    }
}

/// Resolve URL to filesystem path, handling index.html for directories
fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let decoded = request_path(url);
    let clean = decoded.trim_matches('/');

    // Reject paths with suspicious patterns early
    if clean.contains("..") {
        return None;
    }

    let local = serve_root.join(clean);

    // Canonicalize to resolve symlinks and verify path is under serve_root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_file_and_index() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        fs::write(dir.path().join("favicon.ico"), "ico").unwrap();
        fs::write(dir.path().join("blog/index.html"), "<html></html>").unwrap();

        let handler = StaticDir::new("public", dir.path());
        let root = dir.path().canonicalize().unwrap();

        assert_eq!(handler.resolve("/favicon.ico?v=1"), Some(root.join("favicon.ico")));
        assert_eq!(handler.resolve("/blog/"), Some(root.join("blog/index.html")));
        assert_eq!(handler.resolve("/missing.css"), None);
        assert_eq!(handler.name(), "public");
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let inner = dir.path().join("public");
        fs::create_dir_all(&inner).unwrap();
        fs::write(dir.path().join("secret.txt"), "x").unwrap();

        let handler = StaticDir::new("public", &inner);
        assert_eq!(handler.resolve("/../secret.txt"), None);
        assert_eq!(handler.resolve("/%2e%2e/secret.txt"), None);
    }
}
