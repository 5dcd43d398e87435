//! Official track-name resolution

use crate::catalog::CatalogContext;
use crate::error::Result;
use crate::services::embedder::Embedder;

/// Resolve an arbitrary candidate string to the single closest official
/// track name, if its similarity clears `threshold`.
///
/// An empty candidate or an empty catalog returns `None` without
/// invoking the embedder.
pub async fn resolve_official(
    catalog: &CatalogContext,
    embedder: &dyn Embedder,
    candidate: &str,
    threshold: f32,
) -> Result<Option<String>> {
    if candidate.trim().is_empty() || catalog.name_index.is_empty() {
        return Ok(None);
    }

    let query_vec = embedder.encode_one(candidate).await.map_err(crate::error::Error::from)?;
    let hits = catalog.name_index.search(&query_vec, 1)?;

    let Some(&(position, score)) = hits.first() else {
        return Ok(None);
    };
    if score < threshold {
        return Ok(None);
    }
    Ok(catalog.official_names.get(position).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{build_catalog_context, Track};
    use crate::matching::NAME_MATCH_THRESHOLD;
    use crate::services::embedder::EmbedError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MapEmbedder {
        vectors: HashMap<String, Vec<f32>>,
        calls: AtomicUsize,
    }

    impl MapEmbedder {
        fn new(entries: &[(&str, [f32; 3])]) -> Self {
            Self {
                vectors: entries
                    .iter()
                    .map(|(text, vec)| (text.to_string(), vec.to_vec()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Embedder for MapEmbedder {
        async fn encode(&self, texts: &[String]) -> std::result::Result<Vec<Vec<f32>>, EmbedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts
                .iter()
                .map(|t| {
                    self.vectors
                        .get(t)
                        .cloned()
                        .unwrap_or_else(|| vec![0.0, 0.0, 1.0])
                })
                .collect())
        }
    }

    fn catalog_tracks() -> Vec<Track> {
        vec![
            Track {
                name: "Front-End Development".to_string(),
                keyword_text: String::new(),
                interest_text: String::new(),
            },
            Track {
                name: "Data Science".to_string(),
                keyword_text: String::new(),
                interest_text: String::new(),
            },
        ]
    }

    #[tokio::test]
    async fn exact_name_resolves_at_full_similarity() {
        let embedder = MapEmbedder::new(&[
            ("Front-End Development", [1.0, 0.0, 0.0]),
            ("Data Science", [0.0, 1.0, 0.0]),
        ]);
        let catalog = build_catalog_context(catalog_tracks(), &embedder).await.unwrap();

        let resolved = resolve_official(&catalog, &embedder, "Data Science", NAME_MATCH_THRESHOLD)
            .await
            .unwrap();
        assert_eq!(resolved, Some("Data Science".to_string()));
    }

    #[tokio::test]
    async fn below_threshold_resolves_to_none() {
        let embedder = MapEmbedder::new(&[
            ("Front-End Development", [1.0, 0.0, 0.0]),
            ("Data Science", [0.0, 1.0, 0.0]),
            ("Basket Weaving", [0.6, 0.8, 0.0]),
        ]);
        let catalog = build_catalog_context(catalog_tracks(), &embedder).await.unwrap();

        // Best hit scores 0.8, under the 0.85 name-match threshold.
        let resolved = resolve_official(&catalog, &embedder, "Basket Weaving", NAME_MATCH_THRESHOLD)
            .await
            .unwrap();
        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn empty_candidate_skips_embedder() {
        let embedder = MapEmbedder::new(&[("Front-End Development", [1.0, 0.0, 0.0])]);
        let catalog = build_catalog_context(catalog_tracks(), &embedder).await.unwrap();
        let calls_after_build = embedder.calls.load(Ordering::SeqCst);

        let resolved = resolve_official(&catalog, &embedder, "  ", NAME_MATCH_THRESHOLD)
            .await
            .unwrap();
        assert_eq!(resolved, None);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), calls_after_build);
    }

    #[tokio::test]
    async fn empty_catalog_skips_embedder() {
        let embedder = MapEmbedder::new(&[]);
        let catalog = CatalogContext::default();

        let resolved = resolve_official(&catalog, &embedder, "Data Science", NAME_MATCH_THRESHOLD)
            .await
            .unwrap();
        assert_eq!(resolved, None);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    }
}
