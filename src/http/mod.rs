//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, one catch-all handler)
//!     → routing resolver decides the action
//!     → response.rs (file bytes, redirects, error statuses)
//!     → Send to client
//! ```

pub mod mime;
pub mod response;
pub mod server;

pub use server::{app, redirect_app};
