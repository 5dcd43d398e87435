//! trackbot - Conversational track-recommendation service
//!
//! Startup order: config, database, collaborator clients, catalog load
//! and index build, then the HTTP surface. A missing credential or a
//! mis-dimensioned catalog embedding aborts startup; an empty catalog
//! does not.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use trackbot::catalog::build_catalog_context;
use trackbot::config::Settings;
use trackbot::services::{Embedder, GeminiClient, Generator, HttpEmbedder};
use trackbot::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting trackbot v{}", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load()?;

    let db_pool = trackbot::db::init_database_pool(&settings.database_url).await?;
    info!("Database connection established");

    let embedder: Arc<dyn Embedder> = Arc::new(
        HttpEmbedder::new(settings.embedding_url.clone())
            .map_err(|e| anyhow::anyhow!("Failed to create embedder client: {}", e))?,
    );
    let generator: Arc<dyn Generator> = Arc::new(
        GeminiClient::new(
            settings.generation_api_key.clone(),
            settings.generation_model.clone(),
        )
        .map_err(|e| anyhow::anyhow!("Failed to create generation client: {}", e))?,
    );

    let tracks = trackbot::db::tracks::load_tracks(&db_pool).await?;
    if tracks.is_empty() {
        warn!("No track data found; matching will return no results");
    } else {
        info!("Found {} tracks", tracks.len());
    }
    let catalog = Arc::new(build_catalog_context(tracks, embedder.as_ref()).await?);

    let state = AppState::new(db_pool, catalog, embedder, generator);
    let app = trackbot::build_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    info!("Listening on http://{}", settings.bind_addr);
    info!("Health check: http://{}/health", settings.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
