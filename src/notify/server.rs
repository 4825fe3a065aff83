//! Notification service HTTP/WebSocket server.
//!
//! # Responsibilities
//! - `/ws` upgrade endpoint feeding the connection registry
//! - Notify API: push a message to a user or restaurant
//! - Read-only debug introspection of the registry
//! - Health endpoint

use std::sync::Arc;

use axum::{
    extract::{ws::WebSocketUpgrade, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::schema::NotifyConfig;
use crate::http::health::HealthStatus;
use crate::notify::dispatcher::{DispatchOutcome, NotificationDispatcher};
use crate::notify::protocol::IdentityKind;
use crate::notify::registry::ConnectionRegistry;
use crate::notify::socket::handle_socket;

const SERVICE_NAME: &str = "notification-service";

/// Shared state for the notification service.
#[derive(Clone)]
pub struct NotifyState {
    pub registry: Arc<ConnectionRegistry>,
    pub dispatcher: Arc<NotificationDispatcher>,
}

/// Notification service server.
pub struct NotifyServer {
    router: Router,
    registry: Arc<ConnectionRegistry>,
}

impl NotifyServer {
    pub fn new(config: NotifyConfig) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let dispatcher = Arc::new(NotificationDispatcher::new(registry.clone()));
        let state = NotifyState {
            registry: registry.clone(),
            dispatcher,
        };
        let router = Self::build_router(state, config.debug_endpoints);
        Self { router, registry }
    }

    fn build_router(state: NotifyState, debug_endpoints: bool) -> Router {
        let mut router = Router::new()
            .route("/health", get(health_handler))
            .route("/ws", get(ws_handler))
            .route("/notify/user", post(notify_user_handler))
            .route("/notify/restaurant", post(notify_restaurant_handler));

        if debug_endpoints {
            router = router.route("/debug/connections", get(debug_connections_handler));
        }

        router.with_state(state).layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "notification service listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!(
            live_bindings = self.registry.binding_count(),
            "notification service stopped"
        );
        Ok(())
    }
}

/// Body of a notify API call.
#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    pub identity_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct NotifyResponse {
    delivered: bool,
}

#[derive(Debug, Serialize)]
struct NotifyErrorResponse {
    error: &'static str,
}

async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus::ok(SERVICE_NAME))
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<NotifyState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.registry.clone()))
}

async fn notify_user_handler(
    State(state): State<NotifyState>,
    Json(request): Json<NotifyRequest>,
) -> Response {
    notify(&state, IdentityKind::User, request)
}

async fn notify_restaurant_handler(
    State(state): State<NotifyState>,
    Json(request): Json<NotifyRequest>,
) -> Response {
    notify(&state, IdentityKind::Restaurant, request)
}

fn notify(state: &NotifyState, kind: IdentityKind, request: NotifyRequest) -> Response {
    match state
        .dispatcher
        .notify(kind, &request.identity_id, &request.message)
    {
        DispatchOutcome::Delivered => Json(NotifyResponse { delivered: true }).into_response(),
        DispatchOutcome::RecipientOffline => (
            StatusCode::NOT_FOUND,
            Json(NotifyErrorResponse {
                error: "recipient offline",
            }),
        )
            .into_response(),
    }
}

/// Read-only view of the registry. Diagnostic aid only, never a
/// control-plane API.
async fn debug_connections_handler(State(state): State<NotifyState>) -> Response {
    Json(state.registry.snapshot()).into_response()
}
