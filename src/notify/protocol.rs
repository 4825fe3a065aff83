//! Wire protocol for the notification WebSocket.
//!
//! Inbound, a connection sends a register frame binding it to a user
//! and/or restaurant identity. Outbound, the service pushes event frames
//! tagged by recipient kind.

use serde::{Deserialize, Serialize};

/// Logical recipient kind, distinct from its transport connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKind {
    User,
    Restaurant,
}

impl IdentityKind {
    /// Event name tagging outbound notifications for this kind.
    pub fn event_name(self) -> &'static str {
        match self {
            IdentityKind::User => "user-notification",
            IdentityKind::Restaurant => "restaurant-notification",
        }
    }
}

impl std::fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityKind::User => write!(f, "user"),
            IdentityKind::Restaurant => write!(f, "restaurant"),
        }
    }
}

/// Frames a connected client may send.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientFrame {
    /// Bind this connection to the supplied identities. Either, both, or
    /// neither may be present.
    Register {
        #[serde(default)]
        user_id: Option<String>,
        #[serde(default)]
        restaurant_id: Option<String>,
    },
}

/// Outbound notification frame.
#[derive(Debug, Serialize)]
pub struct NotificationEvent<'a> {
    pub event: &'static str,
    pub data: NotificationData<'a>,
}

#[derive(Debug, Serialize)]
pub struct NotificationData<'a> {
    pub message: &'a str,
}

impl<'a> NotificationEvent<'a> {
    pub fn new(kind: IdentityKind, message: &'a str) -> Self {
        Self {
            event: kind.event_name(),
            data: NotificationData { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_register_with_both_identities() {
        let frame: ClientFrame =
            serde_json::from_str(r#"{"event":"register","user_id":"7","restaurant_id":"r9"}"#)
                .unwrap();
        assert_eq!(
            frame,
            ClientFrame::Register {
                user_id: Some("7".into()),
                restaurant_id: Some("r9".into()),
            }
        );
    }

    #[test]
    fn parses_register_with_no_identities() {
        let frame: ClientFrame = serde_json::from_str(r#"{"event":"register"}"#).unwrap();
        assert_eq!(
            frame,
            ClientFrame::Register {
                user_id: None,
                restaurant_id: None,
            }
        );
    }

    #[test]
    fn rejects_unknown_event() {
        assert!(serde_json::from_str::<ClientFrame>(r#"{"event":"subscribe"}"#).is_err());
    }

    #[test]
    fn notification_frame_shape() {
        let event = NotificationEvent::new(IdentityKind::User, "hi");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"event": "user-notification", "data": {"message": "hi"}})
        );
    }

    #[test]
    fn restaurant_notifications_use_their_own_tag() {
        let event = NotificationEvent::new(IdentityKind::Restaurant, "new order");
        assert_eq!(event.event, "restaurant-notification");
    }
}
