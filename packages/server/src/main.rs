use std::sync::Arc;

use anyhow::Context;
use common::storage::filesystem::FilesystemPhotoStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mistakemate_server::config::AppConfig;
use mistakemate_server::database::init_db;
use mistakemate_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;

    let photos = FilesystemPhotoStore::new(
        config.storage.photos_dir.clone(),
        config.storage.max_photo_size,
    )
    .await
    .context("Failed to initialize photo storage")?;
    info!(photos_dir = %config.storage.photos_dir.display(), "Photo storage ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        photos: Arc::new(photos),
        config,
    };
    let app = mistakemate_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
