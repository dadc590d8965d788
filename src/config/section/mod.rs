//! Configuration section definitions.
//!
//! Each module corresponds to a section in `site.toml`:
//!
//! | Module   | TOML Section     | Purpose                              |
//! |----------|------------------|--------------------------------------|
//! | `build`  | `[build]`        | Output and native public directories |
//! | `extra`  | `[extra_public]` | Extra public directory entries       |
//! | `serve`  | `[serve]`        | Development server                   |

mod build;
mod extra;
mod serve;

pub use build::BuildConfig;
pub use extra::ExtraPublicConfig;
pub use serve::ServeConfig;
