//! User-input classification keyword lists
//!
//! Deliberately blunt: plain case-insensitive substring containment, the
//! same lists and precedence as the reference behavior. Negations inside
//! longer clauses can misclassify; that is a known property of the
//! containment approach, not something this layer tries to fix.

/// Terms that mark a message as belonging to the learning domain. Any
/// hit here unconditionally overrides the deny list.
const LEARNING_KEYWORDS: &[&str] = &[
    "learn", "teach", "course", "track", "skill", "programming", "develop", "code",
    "study", "career", "tech", "data", "web", "mobile", "AI", "cloud", "security",
    "frontend", "backend", "fullstack", "devops", "cybersecurity", "blockchain",
    "game dev", "embedded", "iot", "ui/ux", "qa", "testing", "engineer", "analyst",
    "scientist", "developer", "path", "roadmap", "guide", "advice", "recommend",
    "tutorial", "lesson", "education", "training", "certification",
];

/// Deny-list terms, checked by containment only.
const OFF_TOPIC_KEYWORDS: &[&str] = &["كلمه عبيطه"];

/// Rejection-intent substrings, checked before acceptance.
const REJECTION_KEYWORDS: &[&str] = &["no", "not interested", "don't like", "something else", "different"];

/// Acceptance-intent substrings, checked only if no rejection matched.
const ACCEPTANCE_KEYWORDS: &[&str] = &["yes", "interested", "sounds good", "tell me more", "like it"];

/// Reaction to a pending suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Reject,
    Accept,
}

/// Off-topic gate: deny-list hit with no allow-list hit.
pub fn is_off_topic(user_input: &str) -> bool {
    let lower = user_input.to_lowercase();
    let has_learning = LEARNING_KEYWORDS.iter().any(|k| lower.contains(k));
    if has_learning {
        return false;
    }
    OFF_TOPIC_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Classify a reaction to the pending suggestion, rejection first.
pub fn classify_reaction(user_input: &str) -> Option<Reaction> {
    let lower = user_input.to_lowercase();
    if REJECTION_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some(Reaction::Reject);
    }
    if ACCEPTANCE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some(Reaction::Accept);
    }
    None
}
