//! Recursive directory copy.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils::path::canonicalize_existing;

/// Files never copied into the output.
pub const IGNORED_FILE_NAME: &[&str] = &[".DS_Store"];

/// Failure while mirroring a directory tree.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("failed to read directory `{}`", .0.display())]
    ReadDir(PathBuf, #[source] io::Error),

    #[error("failed to create directory `{}`", .0.display())]
    CreateDir(PathBuf, #[source] io::Error),

    #[error("failed to copy `{}` to `{}`", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{}` contains the destination `{}`", .src.display(), .dst.display())]
    Overlap { src: PathBuf, dst: PathBuf },
}

impl CopyError {
    /// The error and its sources joined with `: `.
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}

/// Recursively copy the contents of `src` into `dst`.
///
/// Existing files in `dst` with the same relative path are overwritten,
/// other files in `dst` are left alone. Returns the number of files copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize, CopyError> {
    if canonicalize_existing(dst).starts_with(canonicalize_existing(src)) {
        return Err(CopyError::Overlap {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        });
    }

    let mut count = 0;
    copy_into(src, dst, &mut count)?;
    Ok(count)
}

fn copy_into(src: &Path, dst: &Path, count: &mut usize) -> Result<(), CopyError> {
    let entries = fs::read_dir(src).map_err(|e| CopyError::ReadDir(src.to_path_buf(), e))?;
    fs::create_dir_all(dst).map_err(|e| CopyError::CreateDir(dst.to_path_buf(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| CopyError::ReadDir(src.to_path_buf(), e))?;
        let src_path = entry.path();
        let file_name = entry.file_name();
        let dest_path = dst.join(&file_name);

        if src_path.is_dir() {
            copy_into(&src_path, &dest_path, count)?;
        } else {
            if file_name.to_str().is_some_and(|n| IGNORED_FILE_NAME.contains(&n)) {
                continue;
            }
            fs::copy(&src_path, &dest_path).map_err(|source| CopyError::Copy {
                from: src_path.clone(),
                to: dest_path.clone(),
                source,
            })?;
            *count += 1;
        }
    }

    Ok(())
}
