//! Path and URL utilities.
//!
//! Pure functions for path manipulation.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `normalize_lexically`, `canonicalize_existing`)
//! - [`route`]: Request URL handling (`request_path`, `relative_asset_path`)

pub mod fs;
pub mod route;

pub use fs::{canonicalize_existing, normalize_lexically, normalize_path};
pub use route::{relative_asset_path, request_path};
