//! HTTP API serving the street sweeping calendar to map clients.
//!
//! # Usage
//!
//! ```bash
//! sweepmap-server --config sweepmap.toml
//! sweepmap-server --csv Street_Sweeping_Schedule.csv --bind 127.0.0.1:8080
//! ```
//!
//! `RUST_LOG` controls the log level (default: info).

mod config;
mod http;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Cli, ServerConfig};
use http::{AppState, Clock, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_cli(&cli)?;

    let schedule = config.schedule.clone();
    let dataset =
        tokio::task::spawn_blocking(move || sweepmap_core::load_schedule(&schedule)).await??;
    info!(
        records = dataset.len(),
        skipped = dataset.report().skipped(),
        "Schedule loaded"
    );

    let clock = cli.reference.map_or(Clock::System, Clock::Fixed);
    let app = create_router(AppState::new(dataset).with_clock(clock), &config.server);

    let listener = tokio::net::TcpListener::bind(config.server.bind).await?;
    info!("Server listening on http://{}", config.server.bind);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
