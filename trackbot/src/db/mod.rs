//! Database access for trackbot
//!
//! SQLite via sqlx: one `tracks` table read once at startup, one
//! `chat_sessions` table holding full-document session rows.

pub mod sessions;
pub mod tracks;

use crate::error::Result;
use sqlx::SqlitePool;

/// Initialize database connection pool and run table migrations.
pub async fn init_database_pool(database_url: &str) -> Result<SqlitePool> {
    tracing::debug!("Connecting to database: {}", database_url);
    let pool = SqlitePool::connect(database_url).await?;
    init_tables(&pool).await?;
    Ok(pool)
}

/// Create tables if they don't exist.
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tracks (
            name TEXT PRIMARY KEY,
            keyword_text TEXT NOT NULL DEFAULT '',
            interest_text TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS chat_sessions (
            session_id TEXT PRIMARY KEY,
            messages TEXT NOT NULL DEFAULT '[]',
            last_suggested_track TEXT,
            roadmap_confirmed INTEGER NOT NULL DEFAULT 0,
            rejected_tracks TEXT NOT NULL DEFAULT '[]',
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (tracks, chat_sessions)");

    Ok(())
}
