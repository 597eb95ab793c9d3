use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use service::storage::Store;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::item::Item;
use crate::routes;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file if present, otherwise `SERVER_HOST` / `SERVER_PORT` / `RESOURCE_PATH`.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(format!("{e:#}")))
}

/// Build the demo app serving [`Item`] records from a fresh store.
pub fn build_app(cfg: &AppConfig) -> Router {
    let store = Arc::new(Store::<Item>::new());
    routes::build_router(&cfg.resource.path, store, build_cors())
}

/// Serve `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server.
///
/// Expects `.env` to be loaded and tracing initialised by the caller.
pub async fn run() -> anyhow::Result<()> {
    let cfg = load_config()?;
    let app = build_app(&cfg);

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(%addr, resource = %cfg.resource.path, "starting server");
    serve(listener, app, shutdown_signal()).await
}
