//! Track catalog reads

use sqlx::{Row, SqlitePool};
use tracing::warn;

use crate::catalog::Track;
use crate::error::Result;

/// Load the full track catalog in row order.
///
/// Enforces the catalog invariants at the load boundary: entries with an
/// empty name are dropped, and a duplicate name keeps its first
/// occurrence (the PRIMARY KEY makes duplicates unreachable through this
/// schema, but imported data goes through the same filter).
pub async fn load_tracks(pool: &SqlitePool) -> Result<Vec<Track>> {
    let rows = sqlx::query(
        "SELECT name, keyword_text, interest_text FROM tracks ORDER BY rowid",
    )
    .fetch_all(pool)
    .await?;

    let mut tracks: Vec<Track> = Vec::with_capacity(rows.len());
    for row in rows {
        let name: String = row.get("name");
        if name.is_empty() {
            warn!("Skipping track with empty name");
            continue;
        }
        if tracks.iter().any(|t| t.name == name) {
            warn!("Skipping duplicate track name: {}", name);
            continue;
        }
        tracks.push(Track {
            name,
            keyword_text: row.get("keyword_text"),
            interest_text: row.get("interest_text"),
        });
    }
    Ok(tracks)
}

/// Insert or replace one catalog entry.
pub async fn upsert_track(pool: &SqlitePool, track: &Track) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO tracks (name, keyword_text, interest_text)
        VALUES (?, ?, ?)
        ON CONFLICT(name) DO UPDATE SET
            keyword_text = excluded.keyword_text,
            interest_text = excluded.interest_text
        "#,
    )
    .bind(&track.name)
    .bind(&track.keyword_text)
    .bind(&track.interest_text)
    .execute(pool)
    .await?;

    Ok(())
}
