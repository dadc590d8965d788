//! Content-Type guessing for files served by the dev server.

use std::path::Path;

/// MIME types the host answers with itself.
pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Extension groups and their Content-Type. Extensions are lowercase.
const TABLE: &[(&[&str], &str)] = &[
    (&["html", "htm"], types::HTML),
    (&["txt"], types::PLAIN),
    (&["css"], "text/css; charset=utf-8"),
    (&["js", "mjs", "cjs"], "text/javascript; charset=utf-8"),
    (&["json", "webmanifest"], "application/json"),
    (&["xml"], "application/xml"),
    (&["rss"], "application/rss+xml"),
    (&["atom"], "application/atom+xml"),
    (&["md"], "text/markdown; charset=utf-8"),
    (&["csv"], "text/csv; charset=utf-8"),
    (&["svg"], "image/svg+xml"),
    (&["png"], "image/png"),
    (&["jpg", "jpeg"], "image/jpeg"),
    (&["gif"], "image/gif"),
    (&["webp"], "image/webp"),
    (&["avif"], "image/avif"),
    (&["ico"], "image/x-icon"),
    (&["mp3"], "audio/mpeg"),
    (&["wav"], "audio/wav"),
    (&["ogg", "oga"], "audio/ogg"),
    (&["mp4", "m4v"], "video/mp4"),
    (&["webm"], "video/webm"),
    (&["woff"], "font/woff"),
    (&["woff2"], "font/woff2"),
    (&["ttf"], "font/ttf"),
    (&["otf"], "font/otf"),
    (&["pdf"], "application/pdf"),
    (&["wasm"], "application/wasm"),
    (&["zip"], "application/zip"),
];

/// Guess the Content-Type of `path` from its extension.
pub fn from_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(types::OCTET_STREAM, from_extension)
}

/// Guess the Content-Type for an extension, ignoring case.
pub fn from_extension(ext: &str) -> &'static str {
    let ext = ext.to_ascii_lowercase();
    TABLE
        .iter()
        .find(|(exts, _)| exts.contains(&ext.as_str()))
        .map_or(types::OCTET_STREAM, |(_, mime)| mime)
}
