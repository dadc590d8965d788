//! `[extra_public]` section configuration.
//!
//! Declares extra public directories beyond `build.public`. Entries are kept
//! as raw TOML values here and parsed one by one during setup, so a single
//! malformed entry is dropped instead of failing the whole file.
//!
//! # Example
//!
//! ```toml
//! [extra_public]
//! strict = false
//! dirs = [
//!     "custom",                                      # served in dev, copied before public/
//!     { dir = "brand/logo.svg", copy = "after" },    # file path → its directory
//!     { dir = "static", cwd = "vendor", log = "verbose" },
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::config::FieldPath;

/// Extra public directories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraPublicConfig {
    /// Abort configuration when an entry cannot be resolved,
    /// instead of dropping it.
    pub strict: bool,

    /// Raw entries: a path string or `{ dir, cwd?, copy?, log? }`.
    pub dirs: Vec<toml::Value>,
}

impl ExtraPublicConfig {
    pub const DIRS: FieldPath = FieldPath::new("extra_public.dirs");
    pub const STRICT: FieldPath = FieldPath::new("extra_public.strict");
}
