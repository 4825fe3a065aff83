//! WebSocket connection lifecycle.
//!
//! # Responsibilities
//! - Complete the upgrade handshake
//! - Run one writer task draining the connection's outbound queue
//! - Read register frames and bind identities in the registry
//! - Unregister on disconnect, whatever form the disconnect takes

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::notify::protocol::{ClientFrame, IdentityKind};
use crate::notify::registry::{ConnectionHandle, ConnectionRegistry};

/// Drive one client connection to completion.
///
/// Returns when the client disconnects; registry cleanup has happened by
/// then. A connection that never sends a register frame holds no bindings
/// and its cleanup is a no-op.
pub async fn handle_socket(socket: WebSocket, registry: Arc<ConnectionRegistry>) {
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();
    let handle = ConnectionHandle::new(outbound_tx);
    let conn_id = handle.id();

    tracing::info!(connection = %conn_id, "client connected");

    let (mut sink, mut stream) = socket.split();

    // Single writer per socket; the registry and dispatcher only ever touch
    // the queue, never the socket.
    let writer = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if sink.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(message) = stream.next().await {
        match message {
            Ok(Message::Text(text)) => handle_frame(text.as_str(), &registry, &handle),
            Ok(Message::Close(_)) => break,
            // Ping/pong are answered by axum; binary frames are not part of
            // the protocol.
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(connection = %conn_id, error = %e, "socket error");
                break;
            }
        }
    }

    registry.unregister(&handle);
    writer.abort();
    tracing::info!(connection = %conn_id, "client disconnected");
}

fn handle_frame(text: &str, registry: &ConnectionRegistry, handle: &ConnectionHandle) {
    match serde_json::from_str::<ClientFrame>(text) {
        Ok(ClientFrame::Register {
            user_id,
            restaurant_id,
        }) => {
            if let Some(user_id) = user_id {
                tracing::info!(connection = %handle.id(), user_id = %user_id, "registered user");
                registry.register(IdentityKind::User, &user_id, handle.clone());
            }
            if let Some(restaurant_id) = restaurant_id {
                tracing::info!(connection = %handle.id(), restaurant_id = %restaurant_id, "registered restaurant");
                registry.register(IdentityKind::Restaurant, &restaurant_id, handle.clone());
            }
        }
        Err(e) => {
            // Malformed frames are ignored; the connection stays up.
            tracing::debug!(connection = %handle.id(), error = %e, "unparseable frame");
        }
    }
}
