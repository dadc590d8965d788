//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "dist"     # Build output directory
//! public = "public"   # Native public directory, copied verbatim into output
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Build paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output directory (relative to project root).
    pub output: PathBuf,

    /// Native public directory (relative to project root).
    pub public: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            public: "public".into(),
        }
    }
}

impl BuildConfig {
    pub const OUTPUT: FieldPath = FieldPath::new("build.output");
    pub const PUBLIC: FieldPath = FieldPath::new("build.public");

    /// Validate after paths are normalized to absolute form.
    pub fn validate(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        if self.output == root {
            diag.error_with_hint(
                Self::OUTPUT,
                "output directory must not be the project root",
                "use a subdirectory such as \"dist\"",
            );
        }

        if self.output.starts_with(&self.public) {
            diag.error(
                Self::OUTPUT,
                format!(
                    "output '{}' must not be inside the public directory '{}'",
                    self.output.display(),
                    self.public.display()
                ),
            );
        }

        if self.public.exists() && !self.public.is_dir() {
            diag.error(
                Self::PUBLIC,
                format!("'{}' must be a directory", self.public.display()),
            );
        } else if !self.public.exists() {
            diag.warn(
                Self::PUBLIC,
                format!("'{}' does not exist, nothing to copy", self.public.display()),
            );
        }
    }
}
