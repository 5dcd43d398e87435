//! Shared test fixtures: in-memory database, deterministic embedder,
//! scriptable generator.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use trackbot::catalog::{build_catalog_context, Track};
use trackbot::services::{EmbedError, Embedder, GenerateError, Generator};
use trackbot::AppState;

/// Deterministic embedder mapping known phrases to fixed unit vectors.
///
/// Unknown texts fall back to a diagonal vector whose similarity to every
/// seeded vector stays below both matching thresholds.
pub struct StubEmbedder {
    vectors: HashMap<String, Vec<f32>>,
}

impl StubEmbedder {
    pub fn with_test_vocabulary() -> Self {
        let entries: &[(&str, [f32; 4])] = &[
            ("html css js", [1.0, 0.0, 0.0, 0.0]),
            ("visual creative", [0.0, 1.0, 0.0, 0.0]),
            ("python stats ml", [0.0, 0.0, 1.0, 0.0]),
            ("analytical", [0.0, 0.0, 0.0, 1.0]),
            ("I like building visual things", [0.0, 1.0, 0.0, 0.0]),
            ("Front-End Development", [1.0, 0.0, 0.0, 0.0]),
            ("Data Science", [0.0, 0.0, 1.0, 0.0]),
        ];
        StubEmbedder {
            vectors: entries
                .iter()
                .map(|(text, vec)| (text.to_string(), vec.to_vec()))
                .collect(),
        }
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(texts
            .iter()
            .map(|text| {
                self.vectors
                    .get(text)
                    .cloned()
                    .unwrap_or_else(|| vec![0.5, 0.5, 0.5, 0.5])
            })
            .collect())
    }
}

/// Generator that returns a fixed reply and records every prompt.
pub struct StubGenerator {
    reply: String,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Self {
        StubGenerator {
            reply: reply.to_string(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl Generator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Generator that always fails, for downstream-failure tests.
pub struct FailingGenerator;

#[async_trait]
impl Generator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Err(GenerateError::Network("connection refused".to_string()))
    }
}

pub fn test_tracks() -> Vec<Track> {
    vec![
        Track {
            name: "Front-End Development".to_string(),
            keyword_text: "html css js".to_string(),
            interest_text: "visual creative".to_string(),
        },
        Track {
            name: "Data Science".to_string(),
            keyword_text: "python stats ml".to_string(),
            interest_text: "analytical".to_string(),
        },
    ]
}

/// Build app state over an in-memory database seeded with the test
/// catalog.
pub async fn test_app_state(generator: Arc<dyn Generator>) -> AppState {
    let pool = SqlitePool::connect(":memory:").await.unwrap();
    trackbot::db::init_tables(&pool).await.unwrap();

    let tracks = test_tracks();
    for track in &tracks {
        trackbot::db::tracks::upsert_track(&pool, track).await.unwrap();
    }

    let embedder = Arc::new(StubEmbedder::with_test_vocabulary());
    let catalog = build_catalog_context(
        trackbot::db::tracks::load_tracks(&pool).await.unwrap(),
        embedder.as_ref(),
    )
    .await
    .unwrap();

    AppState::new(pool, Arc::new(catalog), embedder, generator)
}
