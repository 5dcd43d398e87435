//! Relevance retrieval over keyword/interest embeddings

use super::{RELEVANCE_THRESHOLD, RELEVANCE_TOP_K};
use crate::catalog::CatalogContext;
use crate::error::Result;
use crate::services::embedder::Embedder;

/// Return the catalog tracks whose keyword/interest embeddings clear the
/// relevance threshold against the query.
///
/// Duplicates are removed (a track may match on both its keyword and its
/// interest vector); order follows the first hit. An empty index or an
/// empty query short-circuits without invoking the embedder.
pub async fn find_relevant(
    catalog: &CatalogContext,
    embedder: &dyn Embedder,
    query: &str,
) -> Result<Vec<String>> {
    if catalog.keyword_index.is_empty() || query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let query_vec = embedder.encode_one(query).await.map_err(crate::error::Error::from)?;
    let k = RELEVANCE_TOP_K.min(catalog.keyword_index.len());
    let hits = catalog.keyword_index.search(&query_vec, k)?;

    let mut results: Vec<String> = Vec::new();
    for (position, score) in hits {
        if score < RELEVANCE_THRESHOLD {
            continue;
        }
        let Some(name) = catalog.keyword_track_names.get(position) else {
            continue;
        };
        if !results.contains(name) {
            results.push(name.clone());
        }
    }
    Ok(results)
}
