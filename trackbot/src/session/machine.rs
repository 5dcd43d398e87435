//! Session transition function
//!
//! The dialogue state machine lives in the session fields themselves.
//! `classify` tags the inbound input; `apply_reaction` performs the
//! accept/reject transition and reports whether it must be persisted
//! immediately (before the generation call, so a downstream failure
//! never rolls it back).

use super::intent::{self, Reaction};
use super::ChatSession;

/// Canned reply for inputs that fail the off-topic gate.
pub const REFUSAL_MESSAGE: &str =
    "I'm here to help you choose the best learning track. Unfortunately, I can't assist with this topic.";

/// Classified user intent for one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserIntent {
    /// Outside the learning domain; short-circuit the whole turn
    OffTopic,
    /// Declines the pending suggestion
    Reject,
    /// Accepts the pending suggestion
    Accept,
    /// Neither; conversation continues
    Neutral,
}

/// Tag the user input against the current session state.
///
/// Reactions are only meaningful while a suggestion is pending; without
/// one, anything on-topic is neutral.
pub fn classify(user_input: &str, has_pending_suggestion: bool) -> UserIntent {
    if intent::is_off_topic(user_input) {
        return UserIntent::OffTopic;
    }
    if !has_pending_suggestion {
        return UserIntent::Neutral;
    }
    match intent::classify_reaction(user_input) {
        Some(Reaction::Reject) => UserIntent::Reject,
        Some(Reaction::Accept) => UserIntent::Accept,
        None => UserIntent::Neutral,
    }
}

/// Apply an accept/reject transition. Returns true when state changed
/// and the session must be persisted now.
pub fn apply_reaction(session: &mut ChatSession, user_intent: UserIntent) -> bool {
    match user_intent {
        UserIntent::Reject => {
            let Some(track) = session.last_suggested_track.take() else {
                return false;
            };
            if !session.rejected_tracks.contains(&track) {
                session.rejected_tracks.push(track);
            }
            true
        }
        UserIntent::Accept => {
            session.roadmap_confirmed = true;
            true
        }
        UserIntent::OffTopic | UserIntent::Neutral => false,
    }
}

/// Commit a validated suggestion for the next turn.
///
/// Overwrites any prior value: a newly suggested track supersedes the
/// old one even if the old one was never reacted to.
pub fn record_suggestion(session: &mut ChatSession, track: String) {
    session.last_suggested_track = Some(track);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_pending(track: &str) -> ChatSession {
        let mut session = ChatSession::new("s1");
        session.last_suggested_track = Some(track.to_string());
        session
    }

    #[test]
    fn initial_state() {
        let session = ChatSession::new("s1");
        assert!(session.messages.is_empty());
        assert!(session.last_suggested_track.is_none());
        assert!(!session.roadmap_confirmed);
        assert!(session.rejected_tracks.is_empty());
    }

    #[test]
    fn rejection_moves_pending_track_to_rejected_set() {
        let mut session = session_with_pending("Front-End Development");

        let user_intent = classify("no, not really my thing", true);
        assert_eq!(user_intent, UserIntent::Reject);
        assert!(apply_reaction(&mut session, user_intent));

        assert_eq!(session.rejected_tracks, vec!["Front-End Development"]);
        assert!(session.last_suggested_track.is_none());
        assert!(!session.roadmap_confirmed);
    }

    #[test]
    fn rejection_never_duplicates() {
        let mut session = session_with_pending("Data Science");
        session.rejected_tracks.push("Data Science".to_string());

        assert!(apply_reaction(&mut session, UserIntent::Reject));
        assert_eq!(session.rejected_tracks, vec!["Data Science"]);
    }

    #[test]
    fn acceptance_confirms_and_keeps_pending_track() {
        let mut session = session_with_pending("Data Science");

        let user_intent = classify("yes, tell me more", true);
        assert_eq!(user_intent, UserIntent::Accept);
        assert!(apply_reaction(&mut session, user_intent));

        assert!(session.roadmap_confirmed);
        assert_eq!(session.last_suggested_track.as_deref(), Some("Data Science"));
    }

    #[test]
    fn reaction_requires_pending_suggestion() {
        assert_eq!(classify("no thanks", false), UserIntent::Neutral);
    }

    #[test]
    fn off_topic_takes_precedence_over_reaction() {
        assert_eq!(classify("كلمه عبيطه no", true), UserIntent::OffTopic);
    }

    #[test]
    fn neutral_intent_changes_nothing() {
        let mut session = session_with_pending("Data Science");
        let before = session.clone();
        assert!(!apply_reaction(&mut session, UserIntent::Neutral));
        assert_eq!(session, before);
    }

    #[test]
    fn new_suggestion_overwrites_unreacted_one() {
        let mut session = session_with_pending("Data Science");
        record_suggestion(&mut session, "Game Development".to_string());
        assert_eq!(session.last_suggested_track.as_deref(), Some("Game Development"));
    }

    #[test]
    fn confirmed_session_still_transitions() {
        let mut session = session_with_pending("Data Science");
        session.roadmap_confirmed = true;

        assert!(apply_reaction(&mut session, UserIntent::Reject));
        assert_eq!(session.rejected_tracks, vec!["Data Science"]);
    }
}
