use crate::signaling::{ServerState, ws_handler};
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use tracing::info;

/// The rendezvous application: one WebSocket endpoint, shared state.
pub fn app() -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(ServerState::new())
}

/// Serves the application on an already-bound listener. Split out from
/// [`run`] so callers can bind an ephemeral port first.
pub async fn serve(listener: tokio::net::TcpListener) -> Result<()> {
    axum::serve(listener, app())
        .await
        .context("Server terminated")?;
    Ok(())
}

pub async fn run(addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Rendezvous service listening on {}", addr);

    serve(listener).await
}
