//! Notification subsystem.
//!
//! # Data Flow
//! ```text
//! Client WebSocket ──register──▶ socket.rs ──▶ registry.rs (identity → handle)
//! Backend service ──POST /notify/*──▶ dispatcher.rs ──▶ registry lookup
//!     ──▶ push event frame on the live connection, or RecipientOffline
//! ```
//!
//! # Design Decisions
//! - Last-registered-wins per identity; stale closes never evict newer
//!   registrations (compare-and-delete)
//! - Fire-and-forget delivery; no queuing, no durable outbox
//! - Registry operations never await I/O

pub mod dispatcher;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod socket;

pub use dispatcher::{DispatchOutcome, NotificationDispatcher};
pub use protocol::IdentityKind;
pub use registry::{ConnectionHandle, ConnectionId, ConnectionRegistry};
pub use server::NotifyServer;
