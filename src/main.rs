//! API gateway entrypoint.
//!
//! Proxies client requests to the backend services of the marketplace
//! (auth, orders, restaurants, delivery, notifications) over a static
//! route table.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use delivery_gateway::config::{load_gateway_config, GatewayConfig};
use delivery_gateway::http::HttpServer;
use delivery_gateway::lifecycle::{signals, Shutdown};
use delivery_gateway::observability;

#[derive(Parser, Debug)]
#[command(name = "gateway", about = "API gateway for the delivery marketplace")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_gateway_config(path)?,
        None => GatewayConfig::default(),
    };

    observability::logging::init(&format!(
        "delivery_gateway={},tower_http=warn",
        config.observability.log_level
    ));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "configuration loaded"
    );
    if config.routes.is_empty() {
        tracing::warn!("no routes configured; every proxied path will return 404");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Arc::new(Shutdown::new());
    signals::wire_ctrl_c(shutdown.clone());

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
