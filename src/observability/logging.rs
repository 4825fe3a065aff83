//! Structured logging initialization.
//!
//! Uses the tracing crate throughout; the level comes from `RUST_LOG` when
//! set, otherwise from the configured default.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `default_level` applies when `RUST_LOG` is absent, e.g.
/// `"delivery_gateway=info,tower_http=warn"`.
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
