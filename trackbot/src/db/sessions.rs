//! Chat session persistence
//!
//! Full-document upsert per session: compound fields are serialized to
//! JSON columns, the whole row is rewritten on every save. No
//! partial-field updates.

use sqlx::{Row, SqlitePool};

use crate::error::{Error, Result};
use crate::session::{ChatMessage, ChatSession};

/// Load the session for `session_id`, creating a fresh one if none
/// exists yet. The fresh session is persisted immediately so concurrent
/// turns on a new id converge on one row.
pub async fn load_or_create(pool: &SqlitePool, session_id: &str) -> Result<ChatSession> {
    if let Some(session) = load_session(pool, session_id).await? {
        return Ok(session);
    }
    let session = ChatSession::new(session_id);
    save_session(pool, &session).await?;
    Ok(session)
}

/// Load a session by id.
pub async fn load_session(pool: &SqlitePool, session_id: &str) -> Result<Option<ChatSession>> {
    let row = sqlx::query(
        r#"
        SELECT session_id, messages, last_suggested_track, roadmap_confirmed, rejected_tracks
        FROM chat_sessions
        WHERE session_id = ?
        "#,
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let messages: String = row.get("messages");
            let messages: Vec<ChatMessage> = serde_json::from_str(&messages)
                .map_err(|e| Error::Internal(format!("Failed to deserialize messages: {}", e)))?;

            let rejected_tracks: String = row.get("rejected_tracks");
            let rejected_tracks: Vec<String> = serde_json::from_str(&rejected_tracks)
                .map_err(|e| Error::Internal(format!("Failed to deserialize rejected_tracks: {}", e)))?;

            Ok(Some(ChatSession {
                session_id: row.get("session_id"),
                messages,
                last_suggested_track: row.get("last_suggested_track"),
                roadmap_confirmed: row.get::<i64, _>("roadmap_confirmed") != 0,
                rejected_tracks,
            }))
        }
        None => Ok(None),
    }
}

/// Save the full session atomically (single-row upsert).
pub async fn save_session(pool: &SqlitePool, session: &ChatSession) -> Result<()> {
    let messages = serde_json::to_string(&session.messages)
        .map_err(|e| Error::Internal(format!("Failed to serialize messages: {}", e)))?;
    let rejected_tracks = serde_json::to_string(&session.rejected_tracks)
        .map_err(|e| Error::Internal(format!("Failed to serialize rejected_tracks: {}", e)))?;
    let updated_at = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO chat_sessions (
            session_id, messages, last_suggested_track,
            roadmap_confirmed, rejected_tracks, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(session_id) DO UPDATE SET
            messages = excluded.messages,
            last_suggested_track = excluded.last_suggested_track,
            roadmap_confirmed = excluded.roadmap_confirmed,
            rejected_tracks = excluded.rejected_tracks,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&session.session_id)
    .bind(&messages)
    .bind(&session.last_suggested_track)
    .bind(session.roadmap_confirmed as i64)
    .bind(&rejected_tracks)
    .bind(&updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_tables;
    use crate::session::Role;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        init_tables(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn load_or_create_returns_fresh_session() {
        let pool = test_pool().await;
        let session = load_or_create(&pool, "s1").await.unwrap();
        assert_eq!(session.session_id, "s1");
        assert!(session.messages.is_empty());
        assert!(!session.roadmap_confirmed);

        // Row exists now.
        assert!(load_session(&pool, "s1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn session_round_trips_through_upsert() {
        let pool = test_pool().await;
        let mut session = load_or_create(&pool, "s1").await.unwrap();
        session.push(Role::User, "I want to learn something");
        session.push(Role::Assistant, "Great! What interests you?");
        session.last_suggested_track = Some("Data Science".to_string());
        session.roadmap_confirmed = true;
        session.rejected_tracks.push("Front-End Development".to_string());
        save_session(&pool, &session).await.unwrap();

        let loaded = load_or_create(&pool, "s1").await.unwrap();
        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn save_overwrites_previous_row() {
        let pool = test_pool().await;
        let mut session = load_or_create(&pool, "s1").await.unwrap();
        session.last_suggested_track = Some("Data Science".to_string());
        save_session(&pool, &session).await.unwrap();

        session.last_suggested_track = None;
        session.rejected_tracks.push("Data Science".to_string());
        save_session(&pool, &session).await.unwrap();

        let loaded = load_session(&pool, "s1").await.unwrap().unwrap();
        assert_eq!(loaded.last_suggested_track, None);
        assert_eq!(loaded.rejected_tracks, vec!["Data Science"]);
    }

    #[tokio::test]
    async fn sessions_are_isolated_by_id() {
        let pool = test_pool().await;
        let mut a = load_or_create(&pool, "a").await.unwrap();
        a.rejected_tracks.push("Data Science".to_string());
        save_session(&pool, &a).await.unwrap();

        let b = load_or_create(&pool, "b").await.unwrap();
        assert!(b.rejected_tracks.is_empty());
    }
}
