//! Catalog index construction
//!
//! Builds the two similarity indexes from the track catalog: one over
//! keyword/interest texts (recall-oriented relevance retrieval) and one
//! over track names (precision-oriented name resolution).

use tracing::{info, warn};

use super::{CatalogContext, Track, VectorIndex};
use crate::error::Result;
use crate::services::embedder::Embedder;

/// Embed the catalog and build both indexes.
///
/// The keyword/interest corpus is the concatenation of every track's
/// keyword text followed by every track's interest text, in track order,
/// with empty strings dropped before embedding. The `(text, name)` pairs
/// are formed before filtering, and the surviving name halves become the
/// position-to-track mapping; deriving the mapping from unfiltered track
/// order would misattribute matches whenever any text is empty.
pub async fn build_catalog_context(
    tracks: Vec<Track>,
    embedder: &dyn Embedder,
) -> Result<CatalogContext> {
    if tracks.is_empty() {
        warn!("Catalog is empty; all matching will return no results");
        return Ok(CatalogContext::default());
    }

    let official_names: Vec<String> = tracks.iter().map(|t| t.name.clone()).collect();

    // Keywords for all tracks first, then interests for all tracks.
    let mut corpus_pairs: Vec<(&str, &str)> = Vec::with_capacity(tracks.len() * 2);
    for track in &tracks {
        corpus_pairs.push((track.keyword_text.as_str(), track.name.as_str()));
    }
    for track in &tracks {
        corpus_pairs.push((track.interest_text.as_str(), track.name.as_str()));
    }
    corpus_pairs.retain(|(text, _)| !text.is_empty());

    let keyword_texts: Vec<String> = corpus_pairs.iter().map(|(t, _)| t.to_string()).collect();
    let keyword_track_names: Vec<String> =
        corpus_pairs.iter().map(|(_, n)| n.to_string()).collect();

    let keyword_vectors = embedder.encode(&keyword_texts).await.map_err(crate::error::Error::from)?;
    let keyword_index = VectorIndex::build(keyword_vectors)?;
    info!(
        tracks = tracks.len(),
        vectors = keyword_index.len(),
        "Keyword/interest index built"
    );

    let name_vectors = embedder.encode(&official_names).await.map_err(crate::error::Error::from)?;
    let name_index = VectorIndex::build(name_vectors)?;
    info!(vectors = name_index.len(), "Track name index built");

    Ok(CatalogContext {
        tracks,
        official_names,
        keyword_index,
        keyword_track_names,
        name_index,
    })
}
