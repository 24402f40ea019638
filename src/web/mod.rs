//! Web upload server.
//!
//! Routes:
//! - `GET /` serves the upload page
//! - `POST /upload` checks a bill against the registry

pub mod handlers;
pub mod response;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::config::validation::validate_bind_address;
use crate::config::Config;
use crate::dedup::DuplicateRegistry;
use crate::error::Result;
use crate::fs::ensure_dir;

pub use response::{UploadResponse, UploadStatus};

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: Arc<DuplicateRegistry>,
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(config: &Config, registry: Arc<DuplicateRegistry>) -> Self {
        Self {
            registry,
            upload_dir: config.storage.upload_dir.clone(),
            static_dir: config.server.static_dir.clone(),
            max_upload_bytes: config.server.max_upload_bytes,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/upload", post(handlers::upload_bill))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .with_state(state)
}

/// Run the upload server until Ctrl-C is received.
pub async fn serve(config: &Config, registry: Arc<DuplicateRegistry>) -> Result<()> {
    ensure_dir(&config.storage.upload_dir)?;

    let addr: SocketAddr = validate_bind_address(&config.server.bind_address)?;
    let app = router(AppState::new(config, registry));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Upload server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down upload server");
}
