//! HTTP API for the distance agent.
//!
//! ## Endpoints
//!
//! - `POST /calculate-distance` - Ask the agent a distance question
//! - `GET /health` - Health check

mod routes;
pub mod types;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::agent::Agent;
use crate::config::Config;
use crate::maps::DistanceMatrixClient;

pub use routes::{router, AppState};

/// Start the HTTP server and run until a shutdown signal arrives.
///
/// The Maps client and the agent are built here and dropped when the server
/// stops.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let maps = Arc::new(DistanceMatrixClient::new(&config.maps));
    if config.maps.api_key.is_none() {
        tracing::warn!("GOOGLE_MAPS_API_KEY is not set; distance lookups will fail");
    }

    let agent = Arc::new(Agent::from_config(&config, maps));
    let state = Arc::new(AppState::new(agent));
    let app = router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
