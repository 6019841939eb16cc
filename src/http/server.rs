//! HTTP application setup and request handlers.
//!
//! # Responsibilities
//! - Create the Axum router for the main app (one catch-all handler)
//! - Create the plaintext redirect router used in HTTPS mode
//! - Turn `RouteAction`s into responses
//! - Isolate per-request filesystem failures as 500s

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::http::response::{self, CachePolicy};
use crate::routing::{AssetResolver, RouteAction};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<AssetResolver>,
}

/// Build the main application router.
///
/// Every path goes through the routing chain; CORS is wide open because
/// sprite and audio assets are embedded by third-party sites.
pub fn app(resolver: Arc<AssetResolver>) -> Router {
    Router::new()
        .fallback(route_request)
        .with_state(AppState { resolver })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Build the router for the plaintext listener in HTTPS mode. It never
/// touches the routing chain; its sole behavior is the HTTPS redirect.
pub fn redirect_app() -> Router {
    Router::new()
        .fallback(redirect_to_https)
        .layer(TraceLayer::new_for_http())
}

/// Catch-all handler: walk the chain and materialize the action.
async fn route_request(State(state): State<AppState>, request: Request<Body>) -> Response {
    let path = request.uri().path();

    // Only GET and HEAD walk the chain. Every rule answers non-GET traffic
    // with 404 anyway (legacy scripts unconditionally, the rest by not
    // matching), so the refusal happens up front. Preflight OPTIONS is
    // answered by the CORS layer before reaching here.
    let method = request.method();
    if method != Method::GET && method != Method::HEAD {
        return response::status_response(StatusCode::NOT_FOUND);
    }

    match state.resolver.resolve(path).await {
        RouteAction::NotFound => response::status_response(StatusCode::NOT_FOUND),
        RouteAction::ServeRandomBanner => serve_random_banner(state.resolver.banner_dir()).await,
        RouteAction::Redirect(target) => {
            tracing::debug!(path = %path, target = %target, "Legacy sprite redirect");
            response::redirect(&target)
        }
        RouteAction::ServeStatic(file) => {
            // The entry document must always revalidate, even when the
            // static rule resolves it directly (`/`, `/index.html`).
            let cache = if file == state.resolver.spa_index() {
                CachePolicy::Revalidate
            } else {
                CachePolicy::Static
            };
            serve_file(&file, cache).await
        }
        RouteAction::SpaFallback => {
            serve_file(&state.resolver.spa_index(), CachePolicy::Revalidate).await
        }
    }
}

/// Enumerate the banner directory and serve one member uniformly at random.
///
/// The listing is fresh on every call so banners can be hot-added. An empty
/// or unreadable directory is a per-request 500, never a crash.
async fn serve_random_banner(banner_dir: &Path) -> Response {
    let mut banners = Vec::new();

    let mut entries = match tokio::fs::read_dir(banner_dir).await {
        Ok(entries) => entries,
        Err(error) => {
            tracing::error!(dir = %banner_dir.display(), error = %error, "Banner directory unreadable");
            return response::status_response(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let path = entry.path();
                if entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
                    banners.push(path);
                }
            }
            Ok(None) => break,
            Err(error) => {
                tracing::error!(dir = %banner_dir.display(), error = %error, "Banner listing failed");
                return response::status_response(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    if banners.is_empty() {
        tracing::error!(dir = %banner_dir.display(), "Banner directory is empty");
        return response::status_response(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let banner = &banners[fastrand::usize(..banners.len())];
    serve_file(banner, CachePolicy::Revalidate).await
}

async fn serve_file(path: &Path, cache: CachePolicy) -> Response {
    match response::file_response(path, cache).await {
        Ok(response) => response,
        Err(error) => {
            tracing::error!(file = %path.display(), error = %error, "Failed to read file");
            response::status_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Redirect every plaintext request to the same host and path over HTTPS.
///
/// The target carries no port: an explicit plaintext port in the Host
/// header is dropped, and the HTTPS port is assumed to be the scheme
/// default (deployments front port 443).
async fn redirect_to_https(request: Request<Body>) -> Response {
    let Some(host) = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
    else {
        tracing::debug!("Redirect request without Host header");
        return response::status_response(StatusCode::BAD_REQUEST);
    };

    let host = strip_port(host);
    let path_and_query = request
        .uri()
        .path_and_query()
        .map_or("/", |pq| pq.as_str());

    response::redirect(&format!("https://{host}{path_and_query}"))
}

/// Drop an explicit `:port` from a Host header value, keeping IPv6 literal
/// brackets intact.
fn strip_port(host: &str) -> &str {
    if let Some(bracket_end) = host.find(']') {
        return &host[..=bracket_end];
    }
    host.split(':').next().unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_port_handles_plain_and_ipv6_hosts() {
        assert_eq!(strip_port("play.example.com"), "play.example.com");
        assert_eq!(strip_port("play.example.com:8080"), "play.example.com");
        assert_eq!(strip_port("[::1]:8080"), "[::1]");
        assert_eq!(strip_port("[::1]"), "[::1]");
    }
}
