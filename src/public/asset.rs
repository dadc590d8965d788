//! Dev-time asset resolution for one extra public directory.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tiny_http::Request;

use crate::host::{Handler, Outcome, response};
use crate::utils::path::{relative_asset_path, request_path};
use crate::{debug, log};

use super::option::{CopyPhase, ResolvedOption};

/// Prefix of host-internal dev requests, never static assets.
const INTERNAL_PREFIX: &str = "/@";

/// What to do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Serve(PathBuf),
    Defer(DeferReason),
}

/// Why a request was passed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferReason {
    /// No file extension in the request path.
    NotAsset,
    /// Host-internal request (`/@...`).
    Internal,
    /// Path leaves the directory.
    Escapes,
    /// No such file in this directory.
    Missing,
    /// `before` entry and the native public directory has the same file.
    Shadowed,
}

/// Serves one [`ResolvedOption`]'s directory during development.
pub struct AssetResolver {
    option: ResolvedOption,
    public: PathBuf,
    name: String,
}

impl AssetResolver {
    pub fn new(option: ResolvedOption, public: &Path) -> Self {
        let name = format!("extra_public[{}]", option.index);
        Self {
            option,
            public: public.to_path_buf(),
            name,
        }
    }

    /// Decide whether `url` is served from this directory.
    pub fn resolve(&self, url: &str) -> Resolution {
        let path = request_path(url);

        if Path::new(&path).extension().is_none_or(|ext| ext.is_empty()) {
            return Resolution::Defer(DeferReason::NotAsset);
        }
        if path.starts_with(INTERNAL_PREFIX) {
            return Resolution::Defer(DeferReason::Internal);
        }

        let Some(relative) = relative_asset_path(&path) else {
            return Resolution::Defer(DeferReason::Escapes);
        };

        let candidate = self.option.directory.join(&relative);
        if !candidate.is_file() {
            return Resolution::Defer(DeferReason::Missing);
        }

        // The native copy runs after `before` entries and would overwrite
        // this file in the build, so dev must not serve it either.
        if self.option.copy_phase == CopyPhase::Before && self.public.join(&relative).is_file() {
            return Resolution::Defer(DeferReason::Shadowed);
        }

        Resolution::Serve(candidate)
    }
}

impl Handler for AssetResolver {
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, request: Request) -> Result<Outcome> {
        match self.resolve(request.url()) {
            Resolution::Serve(path) => self.stream(request, &path),
            Resolution::Defer(reason) => {
                if reason == DeferReason::Shadowed && self.option.log_level.is_verbose() {
                    log!("public"; "skipped {}, overridden by public dir", request.url());
                }
                Ok(Outcome::Next(request))
            }
        }
    }
}

impl AssetResolver {
    /// Stream `path`, or hand the request back if it cannot be opened.
    fn stream(&self, request: Request, path: &Path) -> Result<Outcome> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                log!("warning"; "failed to stream {}: {}", path.display(), e);
                return Ok(Outcome::Next(request));
            }
        };

        if self.option.log_level.is_verbose() {
            log!("public"; "found asset:\t{}\t{}", request.url(), path.display());
        } else {
            debug!("public"; "{} -> {}", request.url(), path.display());
        }

        response::respond_file(request, file, path)?;
        Ok(Outcome::Handled)
    }
}
