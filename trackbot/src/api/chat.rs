//! Chat turn endpoint
//!
//! One POST /chat call is one conversational turn. The handler holds the
//! session's serialization lock for the whole read-modify-write; the
//! embedding and generation awaits happen under that per-session lock
//! only. Accept/reject transitions are persisted before the generation
//! call, so a downstream failure never rolls them back.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::db;
use crate::error::ApiResult;
use crate::matching::{self, NAME_MATCH_THRESHOLD};
use crate::services::prompt::compose_prompt;
use crate::session::machine::{self, UserIntent, REFUSAL_MESSAGE};
use crate::session::Role;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub user_input: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub assistant_message: String,
    pub session_id: String,
}

/// POST /chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let lock = state.session_lock(&request.session_id).await;
    let _guard = lock.lock().await;

    let mut session = db::sessions::load_or_create(&state.db, &request.session_id).await?;

    let user_intent = machine::classify(&request.user_input, session.last_suggested_track.is_some());
    debug!(session_id = %session.session_id, ?user_intent, "Classified user input");

    let assistant_message = if user_intent == UserIntent::OffTopic {
        // Short-circuit: no relevance search, no generation, no state
        // mutation beyond appending the refusal.
        REFUSAL_MESSAGE.to_string()
    } else {
        if machine::apply_reaction(&mut session, user_intent) {
            // Persist the accept/reject transition now, independent of
            // whether the rest of the turn fails.
            db::sessions::save_session(&state.db, &session).await?;
            info!(
                session_id = %session.session_id,
                rejected = session.rejected_tracks.len(),
                confirmed = session.roadmap_confirmed,
                "Reaction recorded"
            );
        }

        let mut relevant =
            matching::find_relevant(&state.catalog, state.embedder.as_ref(), &request.user_input)
                .await?;
        relevant.retain(|track| !session.rejected_tracks.contains(track));
        debug!(session_id = %session.session_id, ?relevant, "Relevance candidates");

        let prompt = compose_prompt(&session, &relevant, &request.user_input);
        let text = state
            .generator
            .generate(&prompt)
            .await
            .map_err(crate::error::Error::from)?;

        if let Some(candidate) = matching::extract_candidate(&text) {
            if let Some(official) = matching::resolve_official(
                &state.catalog,
                state.embedder.as_ref(),
                &candidate,
                NAME_MATCH_THRESHOLD,
            )
            .await?
            {
                info!(session_id = %session.session_id, track = %official, "Suggestion committed");
                machine::record_suggestion(&mut session, official);
                db::sessions::save_session(&state.db, &session).await?;
            }
        }

        text
    };

    session.push(Role::User, request.user_input);
    session.push(Role::Assistant, assistant_message.clone());
    db::sessions::save_session(&state.db, &session).await?;

    Ok(Json(ChatResponse {
        assistant_message,
        session_id: session.session_id,
    }))
}

/// Build chat routes
pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/chat", post(handle_chat))
}
