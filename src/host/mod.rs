//! The host side of the lifecycle.
//!
//! Everything an integration may rely on from the host:
//! - [`HostPaths`]: project root, output and native public directories,
//!   captured once at configuration time
//! - [`Handler`] / [`HandlerChain`]: dev-server middleware with deferral
//! - [`response`]: helpers for answering a request

mod chain;
pub mod response;
mod static_dir;

pub use chain::{Handler, HandlerChain, Outcome};
pub use static_dir::StaticDir;

use serde::Serialize;
use std::path::PathBuf;

use crate::config::SiteConfig;

/// Read-only paths handed to integrations at configuration setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostPaths {
    /// Project root (directory of `site.toml`).
    pub root: PathBuf,
    /// Build output directory.
    pub output: PathBuf,
    /// Native public directory.
    pub public: PathBuf,
}

impl HostPaths {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            root: config.root.clone(),
            output: config.build.output.clone(),
            public: config.build.public.clone(),
        }
    }
}
