//! Health reporting shared by both services.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// Payload for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp_ms: u64,
}

impl HealthStatus {
    pub fn ok(service: &'static str) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            status: "ok",
            service,
            timestamp_ms,
        }
    }
}
