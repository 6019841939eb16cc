//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, defaults when absent)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → handles passed by construction to routing / net
//! ```
//!
//! # Design Decisions
//! - Config is loaded exactly once at startup and never re-read; the
//!   routing chain holds the directory handles it was constructed with
//! - All fields have defaults so a minimal (or missing) config works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ContentConfig, PortsConfig, ServerConfig, SslConfig};
