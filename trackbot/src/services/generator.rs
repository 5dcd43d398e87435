//! Generative-language collaborator
//!
//! Accepts one composed prompt string and returns free-form assistant
//! prose. The core never retries; a flaky generation call surfaces to the
//! caller as that turn's failure.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const GENERATION_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
// No timeout is inherited from the reference service; 30s keeps a hung
// generation call from pinning a turn forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Generation client errors
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Empty response from generation API")]
    EmptyResponse,
}

impl From<GenerateError> for crate::error::Error {
    fn from(err: GenerateError) -> Self {
        crate::error::Error::Generation(err.to_string())
    }
}

/// Prompt-in, prose-out collaborator.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Client for the Google generative-language REST API
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Result<Self, GenerateError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GenerateError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GENERATION_BASE_URL, self.model, self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        tracing::debug!(model = %self.model, "Requesting generation");

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerateError::Timeout
                } else {
                    GenerateError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerateError::Api(status.as_u16(), error_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Parse(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(GenerateError::EmptyResponse)?;

        Ok(text)
    }
}
