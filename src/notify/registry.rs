//! In-memory registry of live connections keyed by identity.
//!
//! # Responsibilities
//! - `register`: bind an identity to a connection handle (last write wins)
//! - `lookup`: pure read; absence means "recipient currently offline"
//! - `unregister`: compare-and-delete on connection close
//!
//! # Design Decisions
//! - Two maps (by-user, by-restaurant) are the only shared mutable state;
//!   `DashMap` gives per-entry locking so each operation is atomic with
//!   respect to concurrent connection lifecycle events
//! - No staleness detection or heartbeating: an overwritten handle is only
//!   discovered dead when its own transport disconnects
//! - Operations never await I/O

use std::collections::BTreeMap;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::notify::protocol::IdentityKind;

/// Transport-assigned identifier for one WebSocket connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque reference to a live bidirectional channel.
///
/// Cloning shares the same underlying channel; equality of handles is
/// equality of connection IDs.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    tx: mpsc::UnboundedSender<String>,
}

impl ConnectionHandle {
    pub fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self {
            id: ConnectionId::new(),
            tx,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Push a serialized frame onto the connection's outbound queue.
    /// Fails only when the connection's writer task has already gone away.
    pub fn push(&self, frame: String) -> Result<(), ()> {
        self.tx.send(frame).map_err(|_| ())
    }
}

/// Read-only dump of the registry for the debug endpoints.
#[derive(Debug, Serialize)]
pub struct RegistrySnapshot {
    pub users: BTreeMap<String, ConnectionId>,
    pub restaurants: BTreeMap<String, ConnectionId>,
}

/// Maps logical identities to live connection handles.
///
/// Owned by the service process and passed explicitly to the dispatcher and
/// connection lifecycle handlers; there is no global singleton.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    users: DashMap<String, ConnectionHandle>,
    restaurants: DashMap<String, ConnectionHandle>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, kind: IdentityKind) -> &DashMap<String, ConnectionHandle> {
        match kind {
            IdentityKind::User => &self.users,
            IdentityKind::Restaurant => &self.restaurants,
        }
    }

    /// Bind `identity_id` to `handle`, silently replacing any prior
    /// binding for the same identity (last-registered-wins).
    pub fn register(&self, kind: IdentityKind, identity_id: &str, handle: ConnectionHandle) {
        let previous = self.map(kind).insert(identity_id.to_string(), handle);
        if let Some(previous) = previous {
            tracing::debug!(
                kind = %kind,
                identity_id,
                stale_connection = %previous.id(),
                "registration overwrote an earlier binding"
            );
        }
    }

    /// Current handle for an identity, if any. Absence is a normal outcome.
    pub fn lookup(&self, kind: IdentityKind, identity_id: &str) -> Option<ConnectionHandle> {
        self.map(kind).get(identity_id).map(|entry| entry.value().clone())
    }

    /// Remove every binding still pointing at `handle`.
    ///
    /// Compare-and-delete: a binding overwritten by a newer connection is
    /// left untouched, so a stale close event never evicts a live
    /// registration. A no-op here is expected, not an error.
    pub fn unregister(&self, handle: &ConnectionHandle) {
        let id = handle.id();
        self.users.retain(|_, stored| stored.id() != id);
        self.restaurants.retain(|_, stored| stored.id() != id);
    }

    /// Identity → connection-id view for operational diagnosis only.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            users: self
                .users
                .iter()
                .map(|e| (e.key().clone(), e.value().id()))
                .collect(),
            restaurants: self
                .restaurants
                .iter()
                .map(|e| (e.key().clone(), e.value().id()))
                .collect(),
        }
    }

    /// Total number of live bindings across both maps.
    pub fn binding_count(&self) -> usize {
        self.users.len() + self.restaurants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> ConnectionHandle {
        let (tx, _rx) = mpsc::unbounded_channel();
        ConnectionHandle::new(tx)
    }

    #[test]
    fn lookup_after_register_returns_handle() {
        let registry = ConnectionRegistry::new();
        let a = handle();
        registry.register(IdentityKind::User, "7", a.clone());
        assert_eq!(registry.lookup(IdentityKind::User, "7").unwrap().id(), a.id());
    }

    #[test]
    fn lookup_of_unknown_identity_is_none() {
        let registry = ConnectionRegistry::new();
        assert!(registry.lookup(IdentityKind::User, "7").is_none());
        assert!(registry.lookup(IdentityKind::Restaurant, "7").is_none());
    }

    #[test]
    fn user_and_restaurant_namespaces_are_distinct() {
        let registry = ConnectionRegistry::new();
        let a = handle();
        registry.register(IdentityKind::User, "7", a);
        assert!(registry.lookup(IdentityKind::Restaurant, "7").is_none());
    }

    #[test]
    fn reregistration_is_last_write_wins() {
        let registry = ConnectionRegistry::new();
        let a = handle();
        let b = handle();
        registry.register(IdentityKind::User, "7", a.clone());
        registry.register(IdentityKind::User, "7", b.clone());
        let current = registry.lookup(IdentityKind::User, "7").unwrap();
        assert_eq!(current.id(), b.id());
        assert_ne!(current.id(), a.id());
    }

    #[test]
    fn unregister_removes_own_bindings() {
        let registry = ConnectionRegistry::new();
        let a = handle();
        registry.register(IdentityKind::User, "7", a.clone());
        registry.register(IdentityKind::Restaurant, "r9", a.clone());
        registry.unregister(&a);
        assert!(registry.lookup(IdentityKind::User, "7").is_none());
        assert!(registry.lookup(IdentityKind::Restaurant, "r9").is_none());
        assert_eq!(registry.binding_count(), 0);
    }

    #[test]
    fn stale_unregister_is_a_noop() {
        let registry = ConnectionRegistry::new();
        let a = handle();
        let b = handle();
        registry.register(IdentityKind::User, "7", a.clone());
        registry.register(IdentityKind::User, "7", b.clone());
        // A's close event arrives after B overwrote the binding.
        registry.unregister(&a);
        assert_eq!(registry.lookup(IdentityKind::User, "7").unwrap().id(), b.id());
    }

    #[test]
    fn snapshot_reflects_current_bindings() {
        let registry = ConnectionRegistry::new();
        let a = handle();
        let b = handle();
        registry.register(IdentityKind::User, "7", a.clone());
        registry.register(IdentityKind::Restaurant, "r9", b.clone());
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.users.get("7"), Some(&a.id()));
        assert_eq!(snapshot.restaurants.get("r9"), Some(&b.id()));
    }
}
