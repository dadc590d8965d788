//! HTTP response helpers.

use anyhow::Result;
use std::{fs::File, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Stream an already opened file.
///
/// HEAD requests get headers only.
pub fn respond_file(request: Request, file: File, path: &Path) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let response = Response::from_file(file).with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

/// Respond with 404.
pub fn respond_not_found(request: Request, output: &Path) -> Result<()> {
    use crate::utils::mime::types::{HTML, PLAIN};

    let custom_404 = output.join("404.html");
    let has_custom = custom_404.is_file();

    if is_head_request(&request) {
        let mime = if has_custom { HTML } else { PLAIN };
        return send_head(request, 404, mime);
    }

    if has_custom && let Ok(file) = File::open(&custom_404) {
        let response = Response::from_file(file)
            .with_status_code(StatusCode(404))
            .with_header(make_header("Content-Type", HTML));
        request.respond(response)?;
        return Ok(());
    }

    send_body(request, 404, PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    use crate::utils::mime::types::PLAIN;
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    // Both parts are static ASCII, always valid
    Header::from_bytes(key, value).unwrap()
}
