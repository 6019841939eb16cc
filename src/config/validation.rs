//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check port assignments are usable
//! - Require TLS material paths unless running HTTP-only
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - File existence is deliberately NOT checked here: the TLS loader
//!   reports missing files with full context at bind time

use crate::config::schema::ServerConfig;

/// A single semantic configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("ports.{0} must be non-zero")]
    ZeroPort(&'static str),

    #[error("ports.http and ports.https must differ")]
    PortClash,

    #[error("ssl.private_key_path is required unless --http-only is set")]
    MissingKeyPath,

    #[error("ssl.certificate_path is required unless --http-only is set")]
    MissingCertificatePath,
}

/// Validate a parsed configuration against the selected listener mode.
pub fn validate_config(config: &ServerConfig, http_only: bool) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.ports.http == 0 {
        errors.push(ValidationError::ZeroPort("http"));
    }

    if !http_only {
        if config.ports.https == 0 {
            errors.push(ValidationError::ZeroPort("https"));
        }
        if config.ports.https != 0 && config.ports.http == config.ports.https {
            errors.push(ValidationError::PortClash);
        }
        if config.ssl.private_key_path.as_os_str().is_empty() {
            errors.push(ValidationError::MissingKeyPath);
        }
        if config.ssl.certificate_path.as_os_str().is_empty() {
            errors.push(ValidationError::MissingCertificatePath);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
