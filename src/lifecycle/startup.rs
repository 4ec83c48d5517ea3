//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the campus directory
//! - Build the HTTP server and its provider client
//! - Start the metrics exporter when enabled
//! - Bind the listener last, so traffic arrives only when ready

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::location::{CampusDirectory, DirectoryError};
use crate::maps::MapsError;
use crate::observability::metrics;

/// Fatal errors before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load campus data: {0}")]
    Directory(#[from] DirectoryError),

    #[error("failed to build provider client: {0}")]
    Maps(#[from] MapsError),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the service with a validated configuration until `shutdown` fires.
pub async fn run(config: ServiceConfig, shutdown: Shutdown) -> Result<(), StartupError> {
    let directory = CampusDirectory::load(&config.campus)?;
    let server = HttpServer::new(config.clone(), Arc::new(directory))?;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, shutdown.listener()).await?;
    Ok(())
}
