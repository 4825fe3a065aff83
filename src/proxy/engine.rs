//! Request forwarding engine.
//!
//! # Responsibilities
//! - Resolve the inbound path against the route table
//! - Forward method, a defined header subset, and body to the downstream
//! - Apply the fixed request timeout
//! - Relay the downstream status verbatim
//! - Classify transport failures (see [`crate::proxy::error`])

use std::str::FromStr;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, Uri};
use axum::response::Response;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::http::request::X_REQUEST_ID;
use crate::observability::metrics;
use crate::proxy::error::ProxyError;
use crate::routing::RouteTable;

/// Headers copied from the inbound request to the downstream request.
/// Authorization passes through unmodified; verification is the downstream
/// service's responsibility.
const FORWARDED_HEADERS: [header::HeaderName; 3] = [
    header::CONTENT_TYPE,
    header::AUTHORIZATION,
    X_REQUEST_ID,
];

/// Forwards inbound requests to downstream services per the route table.
pub struct ProxyEngine {
    table: RouteTable,
    client: Client<HttpConnector, Body>,
    timeout: Duration,
}

impl ProxyEngine {
    pub fn new(table: RouteTable, timeout: Duration) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            table,
            client,
            timeout,
        }
    }

    /// Proxy one request end to end, producing exactly one response.
    ///
    /// Emits one structured log line per request and never panics on
    /// downstream failure; all error paths collapse into client-safe
    /// responses.
    pub async fn handle(&self, request: Request<Body>) -> Response<Body> {
        let start = Instant::now();
        let method = request.method().clone();
        let path = request.uri().path().to_string();

        let (target, result) = match self.table.resolve(&path) {
            None => (
                "none".to_string(),
                Err(ProxyError::RouteNotFound { path: path.clone() }),
            ),
            Some(route) => {
                let target = route.target.to_string();
                let uri = build_downstream_uri(
                    route.target,
                    &route.downstream_path,
                    request.uri().query(),
                );
                let result = match uri {
                    Ok(uri) => self.dispatch(request, uri).await,
                    Err(e) => Err(e),
                };
                (target, result)
            }
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                match &e {
                    ProxyError::RouteNotFound { .. } => {
                        tracing::warn!(method = %method, path = %path, "no route matched");
                    }
                    ProxyError::DownstreamUnreachable(detail) => {
                        tracing::warn!(method = %method, path = %path, target = %target, error = %detail, "downstream unreachable");
                    }
                    ProxyError::DownstreamTimeout => {
                        tracing::warn!(method = %method, path = %path, target = %target, "downstream timed out");
                    }
                    ProxyError::DownstreamError(detail) => {
                        tracing::error!(method = %method, path = %path, target = %target, error = %detail, "downstream transport error");
                    }
                }
                axum::response::IntoResponse::into_response(e)
            }
        };

        let status = response.status();
        tracing::info!(
            method = %method,
            path = %path,
            target = %target,
            status = status.as_u16(),
            "proxied request"
        );
        metrics::record_request(method.as_str(), status.as_u16(), &target, start);

        response
    }

    /// Forward the request to an already-resolved downstream URI.
    async fn dispatch(
        &self,
        request: Request<Body>,
        uri: Uri,
    ) -> Result<Response<Body>, ProxyError> {
        let (parts, body) = request.into_parts();

        let mut outbound = Request::builder().method(parts.method.clone()).uri(uri);
        if let Some(headers) = outbound.headers_mut() {
            *headers = forwarded_headers(&parts.headers);
        }

        let body = if method_carries_body(&parts.method) {
            body
        } else {
            Body::empty()
        };
        let outbound = outbound
            .body(body)
            .map_err(|e| ProxyError::DownstreamError(e.to_string()))?;

        match tokio::time::timeout(self.timeout, self.client.request(outbound)).await {
            Err(_) => Err(ProxyError::DownstreamTimeout),
            Ok(Err(e)) if e.is_connect() => Err(ProxyError::DownstreamUnreachable(e.to_string())),
            Ok(Err(e)) => Err(ProxyError::DownstreamError(e.to_string())),
            Ok(Ok(response)) => {
                // Pass-through status policy: whatever the downstream said,
                // the caller hears.
                let (parts, body) = response.into_parts();
                Ok(Response::from_parts(parts, Body::new(body)))
            }
        }
    }
}

/// Concatenate target base, stripped path, and original query string.
fn build_downstream_uri(
    target: &str,
    downstream_path: &str,
    query: Option<&str>,
) -> Result<Uri, ProxyError> {
    let uri = match query {
        Some(q) => format!("{}{}?{}", target, downstream_path, q),
        None => format!("{}{}", target, downstream_path),
    };
    Uri::from_str(&uri).map_err(|e| ProxyError::DownstreamError(e.to_string()))
}

/// Copy only the defined header subset; everything else is dropped at the
/// gateway boundary.
fn forwarded_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for name in FORWARDED_HEADERS.iter() {
        if let Some(value) = inbound.get(name) {
            headers.insert(name.clone(), value.clone());
        }
    }
    headers
}

/// Only methods that conventionally carry a body have theirs forwarded.
fn method_carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}
