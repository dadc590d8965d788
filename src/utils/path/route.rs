//! Request URL handling for the dev server.

use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};

/// Decode a request URL into its path part.
///
/// Strips the query string and fragment, then percent-decodes.
/// Invalid UTF-8 after decoding yields an empty string.
///
/// # Examples
/// ```ignore
/// assert_eq!(request_path("/logo.svg?v=2"), "/logo.svg");
/// assert_eq!(request_path("/my%20file.css#top"), "/my file.css");
/// ```
pub fn request_path(url: &str) -> String {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    percent_decode_str(&url[..end])
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default()
}

/// Turn a decoded request path into a path relative to a serve root.
///
/// Returns `None` if any component would leave the root (`..`, a drive
/// prefix) so callers never look outside the directory they serve.
pub fn relative_asset_path(path: &str) -> Option<PathBuf> {
    let mut rel = PathBuf::new();
    for comp in Path::new(path.trim_start_matches('/')).components() {
        match comp {
            Component::Normal(name) => rel.push(name),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(rel)
}
