//! dosescope-web: the dose-response dashboard.
//! Serves:
//!   - Home: ED50/TD50 figure selector with the drug property panel
//!   - Organism: test counts per organism and compound
//!   - A small JSON API over the same data

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{info, warn};

pub use error::ApiError;
pub use router::build_router;
pub use state::{AppState, SharedState};

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let app = build_router(state);
    let listener = TcpListener::bind(addr).await?;
    info!("Dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Could not install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}
