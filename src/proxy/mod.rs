//! Proxy subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request (method, path, headers, body)
//!     → routing::RouteTable (prefix match-and-strip)
//!     → engine.rs (forward to downstream, relay status verbatim)
//!     → error.rs (translate transport failures to client-safe statuses)
//! ```
//!
//! # Design Decisions
//! - Pass-through status policy: downstream semantics are never interpreted
//! - No retries: most proxied operations are non-idempotent writes
//! - Fixed per-request timeout; a hung downstream becomes 504, not a hang

pub mod engine;
pub mod error;

pub use engine::ProxyEngine;
pub use error::ProxyError;
