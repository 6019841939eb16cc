//! Request routing subsystem.
//!
//! # Data Flow
//! ```text
//! request path
//!     → resolver.rs (ordered rule chain, filesystem existence checks)
//!     → RouteAction (404 / banner / redirect / file / SPA fallback)
//!     → http layer turns the action into a response
//! ```
//!
//! # Design Decisions
//! - Evaluation order is a fixed, tested contract: legacy-script refusal
//!   before static serving, sprite fallback before static serving, SPA
//!   fallback last
//! - The chain is total: every path produces exactly one action
//! - Filesystem state is checked per request; nothing is cached

pub mod resolver;

pub use resolver::{AssetResolver, RouteAction};
