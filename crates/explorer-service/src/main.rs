//! Explorer Service - simulated vehicle telemetry over HTTP.
//!
//! Run with: `cargo run -p explorer-service`

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use explorer_service::{AppState, Config, Publisher, publisher};

/// Explorer Service - simulated vehicle telemetry over HTTP.
#[derive(Parser, Debug)]
#[command(name = "explorer-service")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides config).
    #[arg(short, long)]
    bind: Option<String>,

    /// Seconds between ticks, 1-60 (overrides config).
    #[arg(short, long)]
    interval: Option<u64>,

    /// Random seed for a reproducible run (overrides config).
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("explorer_service=info".parse()?)
                .add_directive("explorer_core=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default().unwrap_or_else(|e| {
            warn!("Ignoring unreadable default config: {}", e);
            Config::default()
        }),
    };

    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(interval) = args.interval {
        config.simulation.refresh_interval = interval;
    }
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    config.validate()?;

    let addr: SocketAddr = config.server.bind.parse()?;
    let shutdown = CancellationToken::new();

    match config.simulation.seed {
        Some(seed) => info!("Starting simulation with seed {}", seed),
        None => info!("Starting simulation with a random seed"),
    }
    let state = AppState::start(config, shutdown.child_token());
    let publisher_task = Publisher::new(Arc::clone(&state)).start(shutdown.child_token());

    let app = explorer_service::app(state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let signal_token = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
            }
            info!("Shutting down");
            signal_token.cancel();
        })
        .await?;

    shutdown.cancel();
    publisher::join(publisher_task).await;
    Ok(())
}
