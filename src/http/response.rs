//! Response construction.
//!
//! # Responsibilities
//! - Read files and wrap them with Content-Type and Cache-Control headers
//! - Build explicit 302 redirects
//! - Map per-request failures to error statuses without leaking detail

use std::path::Path;

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::mime;

/// Cache header attached to a served file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Immutable-ish asset under the static root.
    Static,
    /// Must be revalidated every time (SPA document, banners).
    Revalidate,
}

impl CachePolicy {
    fn header_value(self) -> HeaderValue {
        match self {
            CachePolicy::Static => HeaderValue::from_static("public, max-age=3600"),
            CachePolicy::Revalidate => HeaderValue::from_static("no-cache"),
        }
    }
}

/// Read `path` and serve its bytes with content type and cache headers.
pub async fn file_response(path: &Path, cache: CachePolicy) -> Result<Response, std::io::Error> {
    let content = tokio::fs::read(path).await?;

    let mut response = Response::new(Body::from(content));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(mime::content_type_for(path)),
    );
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, cache.header_value());
    Ok(response)
}

/// An explicit 302 Found pointing at `location`.
///
/// A location that is not a legal header value (possible for the
/// Host-derived HTTPS redirect target) yields a 400 instead.
pub fn redirect(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => {
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::FOUND;
            response.headers_mut().insert(header::LOCATION, value);
            response
        }
        Err(_) => status_response(StatusCode::BAD_REQUEST),
    }
}

/// A bare status-line response (404, 500, ...).
pub fn status_response(status: StatusCode) -> Response {
    (status, status.canonical_reason().unwrap_or_default()).into_response()
}
