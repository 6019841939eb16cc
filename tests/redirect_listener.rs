//! Tests of the plaintext listener used in HTTPS mode: its sole behavior
//! is redirecting to the same host and path under the HTTPS scheme.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use tower::ServiceExt;

use spa_gateway::http;

async fn redirect_request(method: &str, host: Option<&str>, uri: &str) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(host) = host {
        builder = builder.header(header::HOST, host);
    }

    http::redirect_app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn redirect_preserves_host_path_and_query() {
    let response = redirect_request("GET", Some("play.example.com"), "/a/b?c=1").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://play.example.com/a/b?c=1"
    );
}

#[tokio::test]
async fn explicit_plaintext_port_is_dropped_from_the_target() {
    let response = redirect_request("GET", Some("play.example.com:8080"), "/ladder").await;

    // No port at all in the target: the HTTPS port is the scheme default.
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://play.example.com/ladder"
    );
}

#[tokio::test]
async fn every_method_and_the_root_path_redirect() {
    for method in ["GET", "POST", "PUT", "DELETE"] {
        let response = redirect_request(method, Some("play.example.com"), "/").await;
        assert_eq!(response.status(), StatusCode::FOUND, "method {method}");
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://play.example.com/"
        );
    }
}

#[tokio::test]
async fn request_without_host_header_is_rejected() {
    let response = redirect_request("GET", None, "/anything").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
