//! OS signal wiring.

use std::sync::Arc;

use crate::lifecycle::Shutdown;

/// Spawn a task that triggers shutdown on Ctrl+C.
pub fn wire_ctrl_c(shutdown: Arc<Shutdown>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            shutdown.trigger();
        }
    });
}
