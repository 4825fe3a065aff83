//! Edge services for a food-delivery marketplace.
//!
//! Two binaries share this library:
//! - `gateway`: API gateway proxying client requests to backend services
//!   over a static route table.
//! - `notifyd`: notification hub mapping users and restaurants to live
//!   WebSocket connections and pushing targeted messages.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod notify;
pub mod observability;
pub mod proxy;
pub mod routing;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
