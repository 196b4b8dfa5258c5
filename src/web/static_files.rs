//! Static file serving for the public assets.
//!
//! Files under `public/` are embedded in release builds (and read from disk
//! in debug builds by rust-embed) and served from the site root, so
//! `public/style.css` is available at `/style.css`.

use axum::{
    body::Body,
    extract::Request,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;

/// Embedded static files from the `public` directory.
#[derive(Embed)]
#[folder = "public"]
pub struct StaticAssets;

/// Serves a static file for any path no page route matched.
///
/// Only `GET` and `HEAD` are answered; unknown paths get 404.
pub async fn serve_static(request: Request) -> Response {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    // Remove leading slash for embed lookup
    let path = request.uri().path().trim_start_matches('/');

    if path.is_empty() || path.split('/').any(|segment| segment == "..") {
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    }

    match StaticAssets::get(path) {
        Some(content) => file_response(path, content.data.as_ref()),
        None => (StatusCode::NOT_FOUND, "File not found").into_response(),
    }
}

/// Creates an HTTP response for a file with appropriate content type.
fn file_response(path: &str, content: &[u8]) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, cache_control_for_path(path))
        .body(Body::from(content.to_vec()))
        .unwrap_or_else(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create response",
            )
                .into_response()
        })
}

/// Returns the Cache-Control header for a static file.
///
/// - Stylesheets and scripts: revalidate, since names carry no content hash
/// - Everything else (images, fonts): short cache (1 hour)
fn cache_control_for_path(path: &str) -> &'static str {
    let is_code = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("css") || ext.eq_ignore_ascii_case("js"));

    if is_code {
        "no-cache"
    } else {
        "public, max-age=3600"
    }
}
