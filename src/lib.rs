//! HTTP/HTTPS front door for a single-page application.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │                 SPA GATEWAY                  │
//!                  │                                              │
//!   http://...     │  ┌──────────┐                                │
//!   ───────────────┼─▶│ redirect │──▶ 302 https://host/path      │
//!                  │  │ listener │    (HTTPS mode only)           │
//!                  │  └──────────┘                                │
//!                  │                                              │
//!   https://...    │  ┌──────────┐    ┌─────────┐    ┌──────────┐ │
//!   ───────────────┼─▶│   net    │───▶│  http   │───▶│ routing  │ │
//!                  │  │ topology │    │ handler │    │ resolver │ │
//!                  │  └──────────┘    └─────────┘    └────┬─────┘ │
//!                  │                                      │       │
//!                  │                                      ▼       │
//!                  │                            static root /     │
//!                  │                            banner directory  │
//!                  └──────────────────────────────────────────────┘
//! ```
//!
//! Every request walks a fixed rule chain: legacy script paths are refused,
//! `/lobby-banner` serves a random banner, absent `afd` sprites redirect to
//! their `gen5` equivalents, existing files are served from the static root,
//! and everything else falls back to the SPA's `index.html`.

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod routing;

pub use config::ServerConfig;
pub use net::topology::ListenerTopology;
pub use routing::AssetResolver;
