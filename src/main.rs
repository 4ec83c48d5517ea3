//! Campus routing service.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────────┐
//!                      │                   CAMPUS ROUTER                    │
//!                      │                                                    │
//!   POST /api/route/   │  ┌────────┐    ┌──────────────┐    ┌────────────┐  │
//!   ───────────────────┼─▶│  http  │───▶│ RoutePlanner │───▶│  location  │  │
//!   WS /ws/routes/live │  │ server │    │              │    │  resolver  │  │
//!   ───────────────────┼─▶│        │    └──────┬───────┘    └─────┬──────┘  │
//!                      │  └────────┘           │                  │         │
//!                      │                       ▼                  ▼         │
//!                      │               ┌──────────────┐    ┌────────────┐   │
//!                      │               │  aggregator  │    │ directory  │   │
//!                      │               └──────┬───────┘    └────────────┘   │
//!                      │                      ▼                             │
//!                      │               ┌──────────────┐                     │
//!                      │               │ maps client  │─────────────────────┼──▶ Google Maps
//!                      │               └──────────────┘                     │
//!                      │                                                    │
//!                      │   config · observability · resilience · lifecycle  │
//!                      └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use campus_router::config::{load_config, load_from_env};
use campus_router::lifecycle::{self, signals, Shutdown};
use campus_router::observability::logging;

#[derive(Parser, Debug)]
#[command(name = "campus-router", version, about = "Campus routing service")]
struct Args {
    /// Path to the TOML configuration file; defaults plus environment when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_from_env()?,
    };

    logging::init_logging(&config.observability);
    tracing::info!("campus-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        provider_timeout_secs = config.maps.timeout_secs,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    lifecycle::run(config, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
