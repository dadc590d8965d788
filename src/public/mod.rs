//! Extra public directories.
//!
//! Lets a site declare asset directories beyond `build.public`:
//!
//! - **setup**: each `[extra_public] dirs` entry is parsed and resolved to an
//!   existing absolute directory; entries that fail are dropped
//! - **serve**: one [`AssetResolver`] per directory, ahead of the host's
//!   static handlers
//! - **build**: `before` directories are copied into the output ahead of the
//!   native public copy, `after` directories once it is done
//!
//! ```text
//! output:  [before dirs] → [public/] → [after dirs]     (later copies win)
//! ```

mod asset;
mod merge;
mod option;
mod resolve;

pub use asset::AssetResolver;
pub use merge::MergeReport;
pub use option::{CopyPhase, OptionError, PublicOption, ResolvedOption};
pub use resolve::ResolveError;

use std::fmt;
use std::path::Path;

use anyhow::{Result, bail};
use serde::Serialize;

use crate::config::ExtraPublicConfig;
use crate::host::{Handler, HostPaths};
use crate::{debug, log};

// ============================================================================
// Dropped Entries
// ============================================================================

/// Why an entry did not make it past setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    Invalid(OptionError),
    Unresolved(ResolveError),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Unresolved(err) => write!(f, "{err}"),
        }
    }
}

/// An entry removed during setup, kept for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct Dropped {
    pub index: usize,
    /// The entry as written in `site.toml`.
    pub entry: String,
    #[serde(serialize_with = "serialize_display")]
    pub reason: DropReason,
}

fn serialize_display<S: serde::Serializer>(
    reason: &DropReason,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(reason)
}

// ============================================================================
// PublicDirs
// ============================================================================

/// Resolved extra public directories, fixed after setup.
#[derive(Debug, Clone)]
pub struct PublicDirs {
    paths: HostPaths,
    options: Vec<ResolvedOption>,
    dropped: Vec<Dropped>,
}

impl PublicDirs {
    /// Parse and resolve every entry, in declaration order.
    ///
    /// Unusable entries are dropped. With `strict`, an entry whose path
    /// cannot be resolved fails setup instead.
    pub fn setup(config: &ExtraPublicConfig, paths: &HostPaths) -> Result<Self> {
        let mut options = Vec::with_capacity(config.dirs.len());
        let mut dropped = Vec::new();

        for (index, raw) in config.dirs.iter().enumerate() {
            let entry = raw.to_string();

            let unknown = PublicOption::unknown_keys(raw);
            if !unknown.is_empty() {
                log!("warning"; "[{}] [{index}] ignoring unknown keys: {}",
                    ExtraPublicConfig::DIRS.as_str(), unknown.join(", "));
            }

            let parsed = match PublicOption::parse(raw) {
                Ok(parsed) => parsed,
                Err(err) => {
                    log!("warning"; "[{}] [{index}] skipped {entry}: {err}",
                        ExtraPublicConfig::DIRS.as_str());
                    dropped.push(Dropped { index, entry, reason: DropReason::Invalid(err) });
                    continue;
                }
            };

            match resolve::resolve_option(index, &parsed, &paths.root) {
                Ok(resolved) => {
                    debug!("public"; "[{index}] {} ({})", resolved.directory.display(), resolved.copy_phase);
                    options.push(resolved);
                }
                Err(err) if config.strict => {
                    bail!(
                        "[{}] [{index}] {err}\n  entry: {parsed}\n  hint: fix the path or set {} = false",
                        ExtraPublicConfig::DIRS.as_str(),
                        ExtraPublicConfig::STRICT.as_str()
                    );
                }
                Err(err) => {
                    let line = skipped_line(index, &entry, &parsed, &err);
                    if parsed.log.is_verbose() {
                        log!("warning"; "{line}");
                    } else {
                        debug!("public"; "{line}");
                    }
                    dropped.push(Dropped { index, entry, reason: DropReason::Unresolved(err) });
                }
            }
        }

        Ok(Self {
            paths: paths.clone(),
            options,
            dropped,
        })
    }

    /// Resolved options in declaration order.
    pub fn options(&self) -> &[ResolvedOption] {
        &self.options
    }

    /// Entries removed during setup.
    pub fn dropped(&self) -> &[Dropped] {
        &self.dropped
    }

    pub fn paths(&self) -> &HostPaths {
        &self.paths
    }

    /// Dev-server handlers, one per option, in declaration order.
    pub fn handlers(&self) -> Vec<Box<dyn Handler>> {
        self.options
            .iter()
            .map(|option| {
                Box::new(AssetResolver::new(option.clone(), &self.paths.public)) as Box<dyn Handler>
            })
            .collect()
    }

    /// Copy the options of `phase` into `output`.
    pub fn merge(&self, phase: CopyPhase, output: &Path) -> MergeReport {
        merge::merge_phase(&self.options, phase, output)
    }
}

/// Warning for an entry whose paths did not resolve. Shows the entry as
/// written and with defaults applied.
fn skipped_line(index: usize, entry: &str, parsed: &PublicOption, err: &ResolveError) -> String {
    format!("[{index}] skipped {entry}: {err}\n  resolved as: {parsed}")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::asset::{DeferReason, Resolution};
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> (TempDir, HostPaths) {
        let dir = TempDir::new().unwrap();
        for d in ["custom", "public", "src/custom", "late"] {
            fs::create_dir_all(dir.path().join(d)).unwrap();
        }
        let paths = HostPaths {
            root: dir.path().to_path_buf(),
            output: dir.path().join("dist"),
            public: dir.path().join("public"),
        };
        (dir, paths)
    }

    fn config(dirs: &str, strict: bool) -> ExtraPublicConfig {
        let table: toml::Table = toml::from_str(&format!("dirs = {dirs}")).unwrap();
        ExtraPublicConfig {
            strict,
            dirs: table["dirs"].as_array().unwrap().clone(),
        }
    }

    #[test]
    fn test_setup_keeps_order_and_defaults() {
        let (dir, paths) = site();
        let dirs = PublicDirs::setup(
            &config(r#"["custom", { dir = "custom", cwd = "src", copy = "after" }]"#, false),
            &paths,
        )
        .unwrap();

        let options = dirs.options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].directory, dir.path().join("custom"));
        assert_eq!(options[0].copy_phase, CopyPhase::Before);
        assert_eq!(options[1].directory, dir.path().join("src/custom"));
        assert_eq!(options[1].copy_phase, CopyPhase::After);
        assert!(dirs.dropped().is_empty());
    }

    #[test]
    fn test_setup_drops_missing_directory() {
        let (_dir, paths) = site();
        let dirs = PublicDirs::setup(
            &config(r#"[{ dir = "does-not-exist", log = "verbose" }, "custom"]"#, false),
            &paths,
        )
        .unwrap();

        assert_eq!(dirs.options().len(), 1);
        assert_eq!(dirs.options()[0].index, 1);
        assert_eq!(dirs.dropped().len(), 1);
        assert!(matches!(
            dirs.dropped()[0].reason,
            DropReason::Unresolved(ResolveError::NotFound(_))
        ));
        assert_eq!(dirs.handlers().len(), 1);
    }

    #[test]
    fn test_setup_drops_regular_file() {
        let (dir, paths) = site();
        fs::write(dir.path().join("README"), "readme").unwrap();

        let dirs = PublicDirs::setup(&config(r#"["README", "custom"]"#, false), &paths).unwrap();
        assert_eq!(dirs.options().len(), 1);
        assert_eq!(dirs.options()[0].index, 1);
        assert!(matches!(
            dirs.dropped()[0].reason,
            DropReason::Unresolved(ResolveError::NotADirectory(_))
        ));

        let err = PublicDirs::setup(&config(r#"["README"]"#, true), &paths).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_skipped_line_keeps_raw_entry() {
        let raw = toml::Value::String("~/missing".into());
        let parsed = PublicOption::parse(&raw).unwrap();
        let err = ResolveError::NotFound("/home/me/missing".into());

        let line = skipped_line(2, &raw.to_string(), &parsed, &err);
        assert!(line.starts_with("[2] skipped \"~/missing\": path does not exist"));
        assert!(line.contains(r#"cwd = "./""#));
    }

    #[test]
    fn test_setup_drops_malformed_entries() {
        let (_dir, paths) = site();
        let dirs =
            PublicDirs::setup(&config(r#"[42, { cwd = "src" }, "", "custom"]"#, false), &paths)
                .unwrap();

        assert_eq!(dirs.options().len(), 1);
        assert_eq!(dirs.dropped().len(), 3);
        assert!(
            dirs.dropped()
                .iter()
                .all(|d| matches!(d.reason, DropReason::Invalid(_)))
        );
    }

    #[test]
    fn test_strict_fails_on_unresolved() {
        let (_dir, paths) = site();
        let err = PublicDirs::setup(&config(r#"["custom", "nope"]"#, true), &paths).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_strict_still_drops_malformed() {
        let (_dir, paths) = site();
        let dirs = PublicDirs::setup(&config(r#"[true, "custom"]"#, true), &paths).unwrap();
        assert_eq!(dirs.options().len(), 1);
        assert_eq!(dirs.dropped().len(), 1);
    }

    #[test]
    fn test_dropped_serializes_reason() {
        let (_dir, paths) = site();
        let dirs = PublicDirs::setup(&config(r#"["nope"]"#, false), &paths).unwrap();
        let json = serde_json::to_value(&dirs.dropped()[0]).unwrap();
        assert_eq!(json["index"], 0);
        assert_eq!(json["entry"], "\"nope\"");
        assert!(json["reason"].as_str().unwrap().contains("does not exist"));
    }

    #[test]
    fn test_build_precedence_before_and_after() {
        let (dir, paths) = site();
        fs::write(dir.path().join("custom/shared.txt"), "before").unwrap();
        fs::write(dir.path().join("custom/only-before.txt"), "before").unwrap();
        fs::write(dir.path().join("late/shared.txt"), "after").unwrap();
        fs::write(dir.path().join("late/native.txt"), "after").unwrap();
        fs::write(dir.path().join("public/shared.txt"), "native").unwrap();
        fs::write(dir.path().join("public/native.txt"), "native").unwrap();

        // after declared first: phases decide, not declaration order
        let dirs = PublicDirs::setup(
            &config(r#"[{ dir = "late", copy = "after" }, "custom"]"#, false),
            &paths,
        )
        .unwrap();

        let output = &paths.output;
        let before = dirs.merge(CopyPhase::Before, output);
        crate::utils::fs::copy_dir_recursive(&paths.public, output).unwrap();
        let after = dirs.merge(CopyPhase::After, output);

        assert!(before.is_clean() && after.is_clean());
        assert_eq!(fs::read_to_string(output.join("only-before.txt")).unwrap(), "before");
        assert_eq!(fs::read_to_string(output.join("shared.txt")).unwrap(), "after");
        assert_eq!(fs::read_to_string(output.join("native.txt")).unwrap(), "after");
    }

    #[test]
    fn test_before_dev_and_build_agree() {
        let (dir, paths) = site();
        fs::write(dir.path().join("custom/logo.svg"), "custom").unwrap();
        fs::write(dir.path().join("public/logo.svg"), "native").unwrap();

        let dirs = PublicDirs::setup(&config(r#"["custom"]"#, false), &paths).unwrap();
        let resolver = AssetResolver::new(dirs.options()[0].clone(), &paths.public);

        // dev: deferred to the native public dir
        assert_eq!(
            resolver.resolve("/logo.svg"),
            Resolution::Defer(DeferReason::Shadowed)
        );

        // build: native copy runs after and wins
        dirs.merge(CopyPhase::Before, &paths.output);
        crate::utils::fs::copy_dir_recursive(&paths.public, &paths.output).unwrap();
        dirs.merge(CopyPhase::After, &paths.output);
        assert_eq!(
            fs::read_to_string(paths.output.join("logo.svg")).unwrap(),
            "native"
        );
    }
}
