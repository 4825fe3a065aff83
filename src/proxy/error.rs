//! Proxy failure taxonomy and client-safe translation.
//!
//! Transport failures are translated at this boundary into stable status
//! codes. Raw error text is logged for operators but never echoed verbatim
//! to untrusted callers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures the proxy engine can surface for a single request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// No configured prefix matched the request path.
    #[error("no route configured for {path}")]
    RouteNotFound { path: String },

    /// Connection-level failure: the downstream process is not reachable.
    #[error("downstream service unreachable: {0}")]
    DownstreamUnreachable(String),

    /// The downstream did not respond within the request timeout.
    #[error("downstream request timed out")]
    DownstreamTimeout,

    /// Any other transport-level failure (protocol error, malformed
    /// response, broken connection mid-stream).
    #[error("downstream transport error: {0}")]
    DownstreamError(String),
}

impl ProxyError {
    /// Status code this failure maps to at the client boundary.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            ProxyError::DownstreamUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::DownstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::DownstreamError(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            // The requested path is client-supplied data, safe to echo for
            // diagnostics.
            ProxyError::RouteNotFound { path } => format!("No route configured for {}", path),
            ProxyError::DownstreamUnreachable(_) => "Service unavailable".to_string(),
            ProxyError::DownstreamTimeout => "Gateway timeout".to_string(),
            ProxyError::DownstreamError(_) => "Upstream request failed".to_string(),
        };
        (status, body).into_response()
    }
}
