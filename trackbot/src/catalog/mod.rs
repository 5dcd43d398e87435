//! Track catalog and its similarity indexes
//!
//! The catalog is loaded once at startup, embedded, and held immutable
//! behind an `Arc` for the life of the process. All per-turn matching
//! reads it without synchronization.

pub mod builder;
pub mod index;

pub use builder::build_catalog_context;
pub use index::VectorIndex;

/// One catalog entry: a learning track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Unique, non-empty track name
    pub name: String,
    /// Free-form keywords/skills text; may be empty
    pub keyword_text: String,
    /// Free-form "matches these interests" text; may be empty
    pub interest_text: String,
}

/// Immutable catalog context shared across all sessions.
///
/// `keyword_track_names` is the authoritative position-to-track mapping
/// for `keyword_index`: it is produced by the same filtered construction
/// step that builds the embedding input list, so a position hit can never
/// be misattributed to a different track.
#[derive(Debug, Clone, Default)]
pub struct CatalogContext {
    /// Full catalog, deduplicated by name
    pub tracks: Vec<Track>,
    /// Track names in catalog order; parallel to `name_index` positions
    pub official_names: Vec<String>,
    /// Index over concatenated keyword/interest texts
    pub keyword_index: VectorIndex,
    /// Originating track name for each `keyword_index` position
    pub keyword_track_names: Vec<String>,
    /// Index over track names, one vector per track
    pub name_index: VectorIndex,
}

impl CatalogContext {
    /// True when the catalog has no tracks at all.
    pub fn is_empty(&self) -> bool {
        self.official_names.is_empty()
    }
}
