//! Extra public directory entries.
//!
//! An entry is either a bare path string or a table:
//!
//! ```toml
//! dirs = [
//!     "custom",
//!     { dir = "static", cwd = "vendor", copy = "after", log = "verbose" },
//! ]
//! ```
//!
//! [`PublicOption::parse`] turns one raw TOML value into a typed option with
//! defaults applied, or an [`OptionError`] describing why it was rejected.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Default working directory for relative `dir` values.
pub const DEFAULT_CWD: &str = "./";

/// Keys accepted in the table form.
const KNOWN_KEYS: &[&str] = &["dir", "cwd", "copy", "log"];

// ============================================================================
// Copy Phase
// ============================================================================

/// When a directory is merged into the output, relative to the native
/// public directory copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyPhase {
    /// Copied first; native public files with the same path win.
    #[default]
    Before,
    /// Copied last; wins over native public files.
    After,
}

impl CopyPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            _ => None,
        }
    }
}

impl fmt::Display for CopyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Per-entry logging. `true` means `Minimal`, `false` means `Off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Off,
    /// Log copies into the output.
    Minimal,
    /// Also log every dev-server match and dropped entries.
    Verbose,
}

impl LogLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Minimal => "minimal",
            Self::Verbose => "verbose",
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self > Self::Off
    }

    pub fn is_verbose(&self) -> bool {
        *self == Self::Verbose
    }

    fn parse(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::Boolean(true) => Some(Self::Minimal),
            toml::Value::Boolean(false) => Some(Self::Off),
            toml::Value::String(s) => match s.as_str() {
                "minimal" => Some(Self::Minimal),
                "verbose" => Some(Self::Verbose),
                _ => None,
            },
            _ => None,
        }
    }
}

// ============================================================================
// Option Error
// ============================================================================

/// Why a raw entry was rejected before any path resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("expected a path string or a table, found {0}")]
    InvalidEntry(&'static str),

    #[error("missing required field `dir`")]
    MissingDir,

    #[error("`{field}` must be a string, found {found}")]
    NotAString {
        field: &'static str,
        found: &'static str,
    },

    #[error("`dir` must not be empty")]
    EmptyDir,

    #[error("`copy` must be \"before\" or \"after\", found {0}")]
    InvalidCopy(String),

    #[error("`log` must be \"verbose\", \"minimal\" or a boolean, found {0}")]
    InvalidLog(String),
}

// ============================================================================
// Public Option
// ============================================================================

/// A parsed entry with defaults applied. Paths are still unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicOption {
    pub dir: String,
    pub cwd: String,
    pub copy: CopyPhase,
    pub log: LogLevel,
}

impl PublicOption {
    /// Create an option with default `cwd`, `copy` and `log`.
    pub fn new(dir: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            cwd: DEFAULT_CWD.into(),
            copy: CopyPhase::default(),
            log: LogLevel::default(),
        }
    }

    /// Parse one raw entry.
    pub fn parse(value: &toml::Value) -> Result<Self, OptionError> {
        let option = match value {
            toml::Value::String(dir) => Self::new(dir.clone()),
            toml::Value::Table(table) => Self::from_table(table)?,
            other => return Err(OptionError::InvalidEntry(other.type_str())),
        };

        if option.dir.is_empty() {
            return Err(OptionError::EmptyDir);
        }
        Ok(option)
    }

    fn from_table(table: &toml::Table) -> Result<Self, OptionError> {
        let dir = match table.get("dir") {
            None => return Err(OptionError::MissingDir),
            Some(value) => string_field("dir", value)?,
        };

        let mut option = Self::new(dir);

        if let Some(value) = table.get("cwd") {
            let cwd = string_field("cwd", value)?;
            // An empty cwd means the default, same as leaving it out
            if !cwd.is_empty() {
                option.cwd = cwd;
            }
        }

        if let Some(value) = table.get("copy") {
            option.copy = value
                .as_str()
                .and_then(CopyPhase::parse)
                .ok_or_else(|| OptionError::InvalidCopy(value.to_string()))?;
        }

        if let Some(value) = table.get("log") {
            option.log =
                LogLevel::parse(value).ok_or_else(|| OptionError::InvalidLog(value.to_string()))?;
        }

        Ok(option)
    }

    /// Keys in a table entry that are not recognized.
    pub fn unknown_keys(value: &toml::Value) -> Vec<&str> {
        value
            .as_table()
            .map(|table| {
                table
                    .keys()
                    .map(String::as_str)
                    .filter(|key| !KNOWN_KEYS.contains(key))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn string_field(field: &'static str, value: &toml::Value) -> Result<String, OptionError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or(OptionError::NotAString {
            field,
            found: value.type_str(),
        })
}

impl fmt::Display for PublicOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ dir = {:?}, cwd = {:?}, copy = \"{}\", log = \"{}\" }}",
            self.dir,
            self.cwd,
            self.copy,
            self.log.as_str()
        )
    }
}

// ============================================================================
// Resolved Option
// ============================================================================

/// An entry whose directories were found on disk.
///
/// Immutable once built; `directory` and `working_directory` are absolute
/// and existed at setup time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOption {
    /// Position in `extra_public.dirs`.
    pub index: usize,
    pub directory: PathBuf,
    pub working_directory: PathBuf,
    pub copy_phase: CopyPhase,
    pub log_level: LogLevel,
}

// ============================================================================
// Tests
// ============================================================================
