//! Listener topology management.
//!
//! # Responsibilities
//! - Bind the configured listeners for the selected mode
//! - HTTP-only mode: one plaintext listener dispatching to the chain
//! - HTTPS mode: a plaintext redirect listener plus a TLS listener
//! - Fail fast on unreadable TLS material or occupied ports

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::config::ServerConfig;
use crate::http;
use crate::net::tls;

/// Fatal startup error. No listener keeps running once one of these is
/// returned.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to bind port {port}: {source}")]
    Bind { port: u16, source: std::io::Error },

    #[error("failed to load TLS material from {}: {source}", .path.display())]
    Tls {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Owns the set of network listeners for one process lifetime.
///
/// The mode is decided once at construction; there is no runtime switching
/// and no fallback between modes.
pub struct ListenerTopology {
    config: ServerConfig,
    http_only: bool,
}

impl ListenerTopology {
    pub fn new(config: ServerConfig, http_only: bool) -> Self {
        Self { config, http_only }
    }

    /// Bind the listeners and serve until shutdown. Runs indefinitely
    /// unless a fatal error occurs or a shutdown signal arrives.
    pub async fn run(self, app: Router) -> Result<(), StartupError> {
        if self.http_only {
            self.run_http_only(app).await
        } else {
            self.run_https(app).await
        }
    }

    /// Single plaintext listener, chain-dispatched. No TLS material is read.
    async fn run_http_only(&self, app: Router) -> Result<(), StartupError> {
        let listener = bind(self.config.ports.http).await?;
        tracing::info!(port = self.config.ports.http, "Listening");

        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(StartupError::Serve)?;

        tracing::info!("Server stopped");
        Ok(())
    }

    /// Plaintext redirect listener plus TLS listener. TLS material is
    /// loaded and both ports are bound before either accept loop starts.
    async fn run_https(&self, app: Router) -> Result<(), StartupError> {
        let tls_config = tls::load_tls_config(
            &self.config.ssl.certificate_path,
            &self.config.ssl.private_key_path,
        )
        .await?;

        let redirect_listener = bind(self.config.ports.http).await?;
        let tls_listener = bind_std(self.config.ports.https)?;

        tracing::info!(port = self.config.ports.http, "Http redirect listening");
        tracing::info!(port = self.config.ports.https, "Listening");

        // One ctrl-c drains both listeners; in-flight requests finish
        // before either accept loop exits.
        let tls_handle = Handle::new();
        let redirect_shutdown = relay_shutdown(shutdown_signal(), tls_handle.clone());

        let redirect_server =
            axum::serve(redirect_listener, http::redirect_app().into_make_service())
                .with_graceful_shutdown(async move {
                    let _ = redirect_shutdown.await;
                })
                .into_future();
        let tls_server = axum_server::from_tcp_rustls(tls_listener, tls_config)
            .handle(tls_handle)
            .serve(app.into_make_service());

        // Either listener failing is fatal for the whole process.
        tokio::try_join!(
            async { redirect_server.await.map_err(StartupError::Serve) },
            async { tls_server.await.map_err(StartupError::Serve) },
        )?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// How long draining connections get before the TLS listener closes them.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Relay one shutdown signal to both listeners: the TLS handle starts its
/// graceful drain, and the returned receiver resolves the redirect
/// listener's graceful-shutdown future.
fn relay_shutdown<S>(signal: S, tls_handle: Handle) -> oneshot::Receiver<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        signal.await;
        tls_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        let _ = tx.send(());
    });
    rx
}

async fn bind(port: u16) -> Result<TcpListener, StartupError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { port, source })
}

/// axum-server accepts a std listener, which also lets the bind failure be
/// reported before its accept loop spins up.
fn bind_std(port: u16) -> Result<std::net::TcpListener, StartupError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener =
        std::net::TcpListener::bind(addr).map_err(|source| StartupError::Bind { port, source })?;
    listener
        .set_nonblocking(true)
        .map_err(|source| StartupError::Bind { port, source })?;
    Ok(listener)
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::AssetResolver;
    use std::sync::Arc;

    #[tokio::test]
    async fn occupied_port_is_fatal_and_names_the_port() {
        let taken = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        let mut config = ServerConfig::default();
        config.ports.http = port;

        let resolver = Arc::new(AssetResolver::new("public", "banners"));
        let error = ListenerTopology::new(config, true)
            .run(http::app(resolver))
            .await
            .unwrap_err();

        assert!(matches!(error, StartupError::Bind { port: p, .. } if p == port));
        assert!(error.to_string().contains(&port.to_string()));
    }

    #[tokio::test]
    async fn https_mode_fails_fast_on_missing_tls_material() {
        let mut config = ServerConfig::default();
        config.ssl.certificate_path = PathBuf::from("/nonexistent/cert.pem");
        config.ssl.private_key_path = PathBuf::from("/nonexistent/key.pem");

        let resolver = Arc::new(AssetResolver::new("public", "banners"));
        let error = ListenerTopology::new(config, false)
            .run(http::app(resolver))
            .await
            .unwrap_err();

        assert!(matches!(error, StartupError::Tls { .. }));
    }

    #[tokio::test]
    async fn shutdown_signal_drains_both_listeners() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();

        let tls_handle = Handle::new();
        let (trigger, signal) = oneshot::channel::<()>();
        let redirect_shutdown = relay_shutdown(
            async move {
                let _ = signal.await;
            },
            tls_handle.clone(),
        );

        let accept_loop = tokio::spawn(
            axum_server::from_tcp(listener)
                .handle(tls_handle)
                .serve(http::redirect_app().into_make_service()),
        );

        trigger.send(()).unwrap();

        // The redirect side observes the relayed signal and the handle-led
        // accept loop exits instead of being dropped mid-flight.
        redirect_shutdown.await.unwrap();
        accept_loop.await.unwrap().unwrap();
    }
}
