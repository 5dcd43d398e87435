//! Per-conversation session state
//!
//! The session is the unit of persistence and concurrency: one row per
//! `session_id`, serialized read-modify-write per session, no
//! coordination across sessions.

pub mod intent;
pub mod machine;

use serde::{Deserialize, Serialize};

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One conversation turn entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Mutable per-conversation state.
///
/// `rejected_tracks` keeps insertion order but has set semantics: a
/// track is never added twice, and the set only grows within a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    pub session_id: String,
    /// Chronological, append-only message log
    pub messages: Vec<ChatMessage>,
    /// Most recent track proposed to the user, awaiting a reaction
    pub last_suggested_track: Option<String>,
    /// True once the user has explicitly accepted a suggestion
    pub roadmap_confirmed: bool,
    /// Tracks the user has explicitly declined
    pub rejected_tracks: Vec<String>,
}

impl ChatSession {
    pub fn new(session_id: impl Into<String>) -> Self {
        ChatSession {
            session_id: session_id.into(),
            messages: Vec::new(),
            last_suggested_track: None,
            roadmap_confirmed: false,
            rejected_tracks: Vec::new(),
        }
    }

    /// Append one message to the log.
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role,
            content: content.into(),
        });
    }
}
