//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file
//!     → loader.rs (read, parse)
//!     → validation.rs (semantic checks, all errors reported)
//!     → schema.rs structs, frozen for the process lifetime
//! ```
//!
//! Route definitions are read-only after startup; there is no reload path.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_gateway_config, load_notify_config, ConfigError};
pub use schema::{GatewayConfig, NotifyConfig, RouteConfig};
