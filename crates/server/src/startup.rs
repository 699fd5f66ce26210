use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.server.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {raw}: {e}")))
}

/// Router over a fresh in-memory store, ready to serve or to drive from tests.
pub fn build_app(cfg: &AppConfig) -> Router {
    let state = ServerState::in_memory(cfg.variables.clone());
    routes::build_router(state, build_cors())
}

/// Serve `cfg` until the listener fails or `shutdown` resolves.
pub async fn run_with_config<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg);
    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, default_scope = %cfg.variables.default_scope, "variables server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Public entry: run the HTTP server for an already loaded configuration until Ctrl+C
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    run_with_config(cfg, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}
