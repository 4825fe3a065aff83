//! Gateway HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router: health endpoint plus catch-all proxy handler
//! - Wire up middleware (tracing, request ID)
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::schema::GatewayConfig;
use crate::http::health::HealthStatus;
use crate::http::request::RequestIdLayer;
use crate::proxy::ProxyEngine;
use crate::routing::RouteTable;

const SERVICE_NAME: &str = "api-gateway";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ProxyEngine>,
}

/// HTTP server for the API gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new gateway server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let table = RouteTable::from_config(&config.routes);
        let engine = Arc::new(ProxyEngine::new(
            table,
            Duration::from_secs(config.timeouts.request_secs),
        ));
        let state = AppState { engine };
        let router = Self::build_router(state);
        Self { router, config }
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .fallback(proxy_handler)
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.config.routes.len(),
            "gateway listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("gateway stopped");
        Ok(())
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus::ok(SERVICE_NAME))
}

/// Catch-all handler: every path not claimed above goes to the proxy engine.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    state.engine.handle(request).await.into_response()
}
