// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Static frontend hosting

use std::path::{Component, Path, PathBuf};

use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use mime_guess::MimeGuess;
use percent_encoding::percent_decode_str;

use super::AppState;

const INDEX: &str = "index.html";

/// Fallback handler: serve files from the static directory
pub(super) async fn serve_asset(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Response {
    let Some(root) = state.static_dir.as_deref() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let Some(mut path) = resolve(root, uri.path()) else {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    };

    if tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_dir()) {
        path.push(INDEX);
    }

    let body = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(_) => return (StatusCode::NOT_FOUND, "not found").into_response(),
    };

    let mime = MimeGuess::from_path(&path).first_or_octet_stream();
    tracing::debug!("static asset {} ({})", path.display(), mime);

    let content_type = HeaderValue::from_str(mime.as_ref())
        .unwrap_or(HeaderValue::from_static("application/octet-stream"));

    if method == Method::HEAD {
        return (StatusCode::OK, [(header::CONTENT_TYPE, content_type)]).into_response();
    }

    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
}

/// Map a request path onto the static root, refusing anything that escapes it
///
/// The path is percent-decoded before its components are checked, so an
/// encoded `..` is refused like a literal one.
fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    if decoded.contains('\0') {
        return None;
    }

    let relative = decoded.trim_start_matches('/');
    let mut path = root.to_path_buf();

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if relative.is_empty() || relative.ends_with('/') {
        path.push(INDEX);
    }

    Some(path)
}
