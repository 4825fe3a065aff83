//! Targeted message dispatch.
//!
//! Looks up the connection registry and pushes the message on the live
//! connection if one exists. Delivery is fire-and-forget: the dispatcher
//! never awaits acknowledgment and performs no queuing or retry. Whether an
//! offline recipient's message is persisted is the caller's decision.

use std::sync::Arc;

use crate::notify::protocol::{IdentityKind, NotificationEvent};
use crate::notify::registry::ConnectionRegistry;

/// Outcome of a dispatch attempt. `RecipientOffline` is data, not failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    RecipientOffline,
}

/// Pushes notifications to the connection currently bound to an identity.
pub struct NotificationDispatcher {
    registry: Arc<ConnectionRegistry>,
}

impl NotificationDispatcher {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Deliver `message` to the identity's live connection, if any.
    ///
    /// Synchronous and non-suspending: the push lands on the connection's
    /// outbound queue, never on the socket directly.
    pub fn notify(&self, kind: IdentityKind, identity_id: &str, message: &str) -> DispatchOutcome {
        let Some(handle) = self.registry.lookup(kind, identity_id) else {
            tracing::debug!(kind = %kind, identity_id, "recipient offline");
            return DispatchOutcome::RecipientOffline;
        };

        let frame = match serde_json::to_string(&NotificationEvent::new(kind, message)) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(kind = %kind, identity_id, error = %e, "failed to encode notification");
                return DispatchOutcome::RecipientOffline;
            }
        };

        match handle.push(frame) {
            Ok(()) => {
                tracing::info!(
                    kind = %kind,
                    identity_id,
                    connection = %handle.id(),
                    "notification delivered"
                );
                DispatchOutcome::Delivered
            }
            Err(()) => {
                // The socket died but its close event has not reached the
                // registry yet; from the caller's view the recipient is
                // simply offline.
                tracing::debug!(
                    kind = %kind,
                    identity_id,
                    connection = %handle.id(),
                    "connection channel closed, treating as offline"
                );
                DispatchOutcome::RecipientOffline
            }
        }
    }
}
