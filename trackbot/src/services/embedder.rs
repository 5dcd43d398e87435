//! Embedding collaborator boundary
//!
//! The core treats the embedder as an opaque pure function: ordered texts
//! in, unit-normalized float32 vectors of one fixed dimension out. The
//! production implementation talks to an embedding server over HTTP;
//! tests substitute deterministic stubs through the trait.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Embedder client errors
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Embedding count mismatch: sent {sent}, received {received}")]
    CountMismatch { sent: usize, received: usize },
}

impl From<EmbedError> for crate::error::Error {
    fn from(err: EmbedError) -> Self {
        crate::error::Error::Embedding(err.to_string())
    }
}

/// Text-to-vector collaborator.
///
/// Must be deterministic for identical input within a process lifetime;
/// index build and query go through the same instance.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Encode texts to unit-normalized vectors, same order as input.
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;

    /// Encode a single text.
    async fn encode_one(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut vectors = self.encode(&[text.to_string()]).await?;
        vectors.pop().ok_or(EmbedError::CountMismatch {
            sent: 1,
            received: 0,
        })
    }
}

/// Normalize a vector in place; returns false for zero/non-finite norms.
pub fn normalize_l2_in_place(values: &mut [f32]) -> bool {
    let sum: f32 = values.iter().map(|v| v * v).sum();
    if !sum.is_finite() || sum <= 0.0 {
        return false;
    }
    let norm = sum.sqrt();
    for value in values.iter_mut() {
        *value /= norm;
    }
    true
}

/// HTTP client for an embedding server
///
/// Speaks the text-embeddings-inference protocol: `POST {base}/embed`
/// with `{"inputs": [...], "normalize": true}`, response is a JSON array
/// of float arrays.
pub struct HttpEmbedder {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpEmbedder {
    pub fn new(base_url: String) -> Result<Self, EmbedError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EmbedError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/embed", self.base_url);
        let body = serde_json::json!({
            "inputs": texts,
            "normalize": true,
        });

        tracing::debug!(count = texts.len(), "Requesting embeddings");

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmbedError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EmbedError::Api(status.as_u16(), error_text));
        }

        let mut vectors: Vec<Vec<f32>> = response
            .json()
            .await
            .map_err(|e| EmbedError::Parse(e.to_string()))?;

        if vectors.len() != texts.len() {
            return Err(EmbedError::CountMismatch {
                sent: texts.len(),
                received: vectors.len(),
            });
        }

        // Normalize on receipt so dot product equals cosine similarity
        // even against servers that ignore the normalize flag.
        for vector in &mut vectors {
            normalize_l2_in_place(vector);
        }

        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_produces_unit_length() {
        let mut values = vec![3.0_f32, 4.0];
        assert!(normalize_l2_in_place(&mut values));
        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn normalize_rejects_zero_vector() {
        let mut values = vec![0.0_f32, 0.0];
        assert!(!normalize_l2_in_place(&mut values));
    }

    #[test]
    fn client_creation_strips_trailing_slash() {
        let client = HttpEmbedder::new("http://127.0.0.1:8080/".to_string()).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:8080");
    }
}
