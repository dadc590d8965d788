//! Site build.
//!
//! Pipeline phases:
//! - **Init** - create the output directory (`--clean` removes it first)
//! - **Before** - merge `before` extra public directories
//! - **Public** - copy the native public directory (fatal on error)
//! - **After** - merge `after` extra public directories
//! - **Finalize** - summary log line

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::{
    debug,
    host::HostPaths,
    log,
    public::{CopyPhase, MergeReport, PublicDirs},
    utils::{fs::copy_dir_recursive, plural_count},
};

/// What a build copied.
#[derive(Debug)]
pub struct BuildSummary {
    pub before: MergeReport,
    /// Files copied from the native public directory.
    pub public_files: usize,
    pub after: MergeReport,
}

impl BuildSummary {
    pub fn total_files(&self) -> usize {
        self.before.copied_files() + self.public_files + self.after.copied_files()
    }

    pub fn failed(&self) -> usize {
        self.before.failures().count() + self.after.failures().count()
    }
}

/// Build the site into `paths.output`.
///
/// Pipeline: init -> before -> public -> after -> finalize
pub fn build_site(paths: &HostPaths, dirs: &PublicDirs, clean: bool) -> Result<BuildSummary> {
    init_output(&paths.output, clean)?;

    let before = dirs.merge(CopyPhase::Before, &paths.output);
    let public_files = copy_native_public(&paths.public, &paths.output)?;
    let after = dirs.merge(CopyPhase::After, &paths.output);

    let summary = BuildSummary {
        before,
        public_files,
        after,
    };
    log_build_result(&summary);

    Ok(summary)
}

fn init_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn copy_native_public(public: &Path, output: &Path) -> Result<usize> {
    if !public.is_dir() {
        debug!("build"; "no public directory at {}", public.display());
        return Ok(0);
    }

    copy_dir_recursive(public, output).with_context(|| {
        format!("Failed to copy public directory: {}", public.display())
    })
}

fn log_build_result(summary: &BuildSummary) {
    match summary.failed() {
        0 => log!("build"; "done, {} copied", plural_count(summary.total_files(), "file")),
        n => log!(
            "build";
            "done, {} copied, {} failed",
            plural_count(summary.total_files(), "file"),
            plural_count(n, "directory merge")
        ),
    }
}
