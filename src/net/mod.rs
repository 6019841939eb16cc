//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! startup
//!     → topology.rs (pick HTTP-only or HTTPS mode, bind listeners)
//!     → tls.rs (load key/cert material, HTTPS mode only)
//!     → axum / axum-server accept loops
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - The mode is fixed for process lifetime; there is no fallback from
//!   HTTPS to HTTP-only when TLS material is missing
//! - Every bind happens before any accept loop starts, so a port conflict
//!   aborts startup with the offending port named and no partial listener
//!   left running

pub mod tls;
pub mod topology;

pub use topology::{ListenerTopology, StartupError};
