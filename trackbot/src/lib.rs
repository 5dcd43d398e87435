//! trackbot - Conversational track-recommendation service
//!
//! Guides a user through multi-turn dialogue toward one of a fixed
//! catalog of learning tracks. Free-form language is grounded in the
//! catalog via similarity search over embeddings; a per-session state
//! machine tracks what has been suggested, confirmed, and rejected.

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod matching;
pub mod services;
pub mod session;

pub use crate::error::{ApiError, ApiResult, Error, Result};

use axum::Router;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::catalog::CatalogContext;
use crate::services::{Embedder, Generator};

/// Application state shared across handlers
///
/// The catalog and its indexes are read-only after startup and shared
/// freely. Session rows are the only mutable shared resource; the lock
/// map serializes read-modify-write per session id.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Immutable catalog and similarity indexes
    pub catalog: Arc<CatalogContext>,
    /// Embedding collaborator
    pub embedder: Arc<dyn Embedder>,
    /// Generation collaborator
    pub generator: Arc<dyn Generator>,
    /// Per-session turn serialization
    session_locks: Arc<RwLock<HashMap<String, Arc<Mutex<()>>>>>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        catalog: Arc<CatalogContext>,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            db,
            catalog,
            embedder,
            generator,
            session_locks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get (or create) the serialization lock for one session id.
    ///
    /// The returned handle is locked by the caller; the map's own lock
    /// is never held across an await point in a turn. Entries whose
    /// handle no turn currently holds are dropped here, so the map
    /// tracks in-flight sessions rather than every id ever seen.
    pub async fn session_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.session_locks.write().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Number of session lock entries currently held.
    pub async fn session_lock_count(&self) -> usize {
        self.session_locks.read().await.len()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::chat_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
