//! Suggestion extraction from assistant prose
//!
//! The assistant is instructed to bold the track it proposes. Rule 1
//! takes the first emphasized span; rule 2 falls back to the
//! "recommend the <X> track" phrasing. Whatever comes out here is still
//! only a candidate: it must pass name resolution before it touches
//! session state.

use regex::Regex;
use std::sync::LazyLock;

static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("emphasis regex"));

static RECOMMEND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)recommend the\s+(.*?)\s+track").expect("recommend regex"));

const TRIM_CHARS: &[char] = &[' ', '.', ':', ',', '!', '?'];

/// Extract a candidate track name from assistant text.
///
/// Returns `None` when neither rule matches; that is not an error — the
/// turn simply commits no suggestion.
pub fn extract_candidate(assistant_text: &str) -> Option<String> {
    if let Some(captures) = EMPHASIS_RE.captures(assistant_text) {
        let candidate = captures[1].trim_matches(TRIM_CHARS);
        let lower = candidate.to_lowercase();
        // Spans like "**learning track**" are emphasis, not a name.
        if candidate.chars().count() > 3 && !lower.contains("track") && !lower.contains("path") {
            return Some(candidate.to_string());
        }
    }

    RECOMMEND_RE
        .captures(assistant_text)
        .map(|captures| captures[1].trim_matches(TRIM_CHARS).to_string())
}
