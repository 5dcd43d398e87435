//! Semantic matching over the track catalog
//!
//! Two passes with different tolerances: relevance retrieval is
//! recall-oriented (its output is advisory context for generation),
//! name resolution is precision-oriented (its output is committed to
//! session state).

pub mod extract;
pub mod relevance;
pub mod resolve;

pub use extract::extract_candidate;
pub use relevance::find_relevant;
pub use resolve::resolve_official;

/// Minimum similarity for a keyword/interest hit to count as relevant.
pub const RELEVANCE_THRESHOLD: f32 = 0.7;

/// Minimum similarity for a free-text mention to resolve to an official
/// track name.
pub const NAME_MATCH_THRESHOLD: f32 = 0.85;

/// Neighbors considered per relevance query.
pub const RELEVANCE_TOP_K: usize = 3;
