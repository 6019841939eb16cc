//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config
//! file, with defaults matching the layout the deployment scripts produce
//! (a `public/` static root and a `banners/` directory beside the binary).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen ports for the plaintext and TLS listeners.
    pub ports: PortsConfig,

    /// TLS key/certificate material (unused in HTTP-only mode).
    pub ssl: SslConfig,

    /// Filesystem locations of the served content.
    pub content: ContentConfig,
}

/// Listen ports.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct PortsConfig {
    /// Plaintext port. Serves the app in HTTP-only mode; serves only the
    /// HTTPS redirect otherwise.
    pub http: u16,

    /// TLS port (ignored in HTTP-only mode).
    pub https: u16,
}

impl Default for PortsConfig {
    fn default() -> Self {
        Self {
            http: 8080,
            https: 8443,
        }
    }
}

/// TLS material locations (PEM).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SslConfig {
    /// Path to the private key file.
    pub private_key_path: PathBuf,

    /// Path to the certificate (chain) file.
    pub certificate_path: PathBuf,
}

/// Served content locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory tree exposed verbatim at URL path `/`.
    pub static_root: PathBuf,

    /// Directory of lobby banner images, re-enumerated per request so
    /// banners can be added without a restart.
    pub banner_dir: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            static_root: PathBuf::from("public"),
            banner_dir: PathBuf::from("banners"),
        }
    }
}
