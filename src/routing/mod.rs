//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → table.rs (prefix match-and-strip)
//!     → Return: resolved downstream target + rewritten path, or NoMatch
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: first configured prefix wins
//! - Explicit no-match rather than silent default

pub mod table;

pub use table::{ResolvedRoute, RouteTable};
