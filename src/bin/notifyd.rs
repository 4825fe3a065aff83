//! Notification service entrypoint.
//!
//! Hosts the WebSocket hub and the notify REST API. Backend services call
//! the notify API; connected clients receive targeted event frames.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use delivery_gateway::config::load_notify_config;
use delivery_gateway::config::schema::NotifyConfig;
use delivery_gateway::lifecycle::{signals, Shutdown};
use delivery_gateway::notify::NotifyServer;
use delivery_gateway::observability;

#[derive(Parser, Debug)]
#[command(name = "notifyd", about = "Real-time notification service")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_notify_config(path)?,
        None => NotifyConfig::default(),
    };

    observability::logging::init(&format!(
        "delivery_gateway={},tower_http=warn",
        config.observability.log_level
    ));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        debug_endpoints = config.debug_endpoints,
        "configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Arc::new(Shutdown::new());
    signals::wire_ctrl_c(shutdown.clone());

    let server = NotifyServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
