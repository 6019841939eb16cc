//! TLS configuration and certificate loading.

use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

use crate::net::topology::StartupError;

/// Load TLS configuration from certificate and key files.
///
/// Missing or unparseable files are reported with the offending path; the
/// caller treats the error as fatal.
pub async fn load_tls_config(cert_path: &Path, key_path: &Path) -> Result<RustlsConfig, StartupError> {
    for path in [cert_path, key_path] {
        if !path.exists() {
            return Err(StartupError::Tls {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        }
    }

    RustlsConfig::from_pem_file(cert_path, key_path)
        .await
        .map_err(|source| StartupError::Tls {
            path: cert_path.to_path_buf(),
            source,
        })
}
