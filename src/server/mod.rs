//! HTTP surface: router, shared state and the server loop.

pub mod handlers;
pub mod router;
pub mod state;

pub use router::{app_router, cors_layer};
pub use state::AppState;

use crate::config::Config;
use hyper::Server;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn start_server(state: AppState, config: &Config) -> anyhow::Result<()> {
    let addr: SocketAddr = config.bind_address().parse()?;
    let app = app_router(state, cors_layer(&config.server.allowed_origin)?);

    info!("HTTP server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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
}
