//! Build-time merge of extra public directories into the output.

use std::path::{Path, PathBuf};

use crate::log;
use crate::utils::fs::{CopyError, copy_dir_recursive};

use super::option::{CopyPhase, ResolvedOption};

/// Result of copying one directory.
#[derive(Debug)]
pub enum MergeOutcome {
    Copied { files: usize },
    Failed(CopyError),
}

/// One option's contribution to a merge.
#[derive(Debug)]
pub struct MergeEntry {
    pub index: usize,
    pub directory: PathBuf,
    pub outcome: MergeOutcome,
}

/// Per-option results of one copy phase.
#[derive(Debug)]
pub struct MergeReport {
    pub phase: CopyPhase,
    pub entries: Vec<MergeEntry>,
}

impl MergeReport {
    /// Total files copied across successful entries.
    pub fn copied_files(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry.outcome {
                MergeOutcome::Copied { files } => files,
                MergeOutcome::Failed(_) => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&MergeEntry, &CopyError)> {
        self.entries.iter().filter_map(|entry| match &entry.outcome {
            MergeOutcome::Failed(err) => Some((entry, err)),
            MergeOutcome::Copied { .. } => None,
        })
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Copy every option of `phase` into `output`, in declaration order.
///
/// A failing option is logged and recorded; later options still run.
pub fn merge_phase(options: &[ResolvedOption], phase: CopyPhase, output: &Path) -> MergeReport {
    let entries = options
        .iter()
        .filter(|option| option.copy_phase == phase)
        .map(|option| merge_one(option, output))
        .collect();

    MergeReport { phase, entries }
}

fn merge_one(option: &ResolvedOption, output: &Path) -> MergeEntry {
    if option.log_level.is_enabled() {
        log!("public"; "copying directory into output: {}", option.directory.display());
    }

    let outcome = match copy_dir_recursive(&option.directory, output) {
        Ok(files) => MergeOutcome::Copied { files },
        Err(err) => {
            log!(
                "warning";
                "failed to copy public dir into output ({} phase): {}",
                option.copy_phase,
                err.chain()
            );
            MergeOutcome::Failed(err)
        }
    };

    MergeEntry {
        index: option.index,
        directory: option.directory.clone(),
        outcome,
    }
}
