//! Sawit RPC Server - REST query façade for the traceability ledger.
//!
//! This binary exposes the `sawit-core` query dispatcher over two JSON
//! endpoints: `POST /query` (function with arguments) and `GET /queryAll`
//! (zero-argument function).

mod handler;
mod server;

use anyhow::Result;
use clap::Parser;
use sawit_core::ledger::rest::RestConnector;
use sawit_core::{GatewayConfig, QueryDispatcher};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "sawit-rpc")]
#[command(about = "REST query server for the sawit traceability ledger")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Directory holding wallet/ and profiles/ (defaults to current directory)
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Gateway configuration file (overrides data-root defaults)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting Sawit RPC Server");

    let config = match &args.config {
        Some(path) => GatewayConfig::load(path)?,
        None => {
            let root = match args.data_root {
                Some(path) => path,
                None => std::env::current_dir()?,
            };
            GatewayConfig::with_root(&root)
        }
    };
    info!(
        "Channel '{}', chaincode '{}', wallets under {}",
        config.channel,
        config.chaincode,
        config.wallet_root.display()
    );

    let connector = Arc::new(RestConnector::new()?);
    let dispatcher = QueryDispatcher::new(config, connector);

    let addr = server::start_server(dispatcher, &args.host, args.port).await?;
    info!("Query gateway running on {}", addr);

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}
