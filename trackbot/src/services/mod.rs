//! Collaborator clients and prompt composition

pub mod embedder;
pub mod generator;
pub mod prompt;

pub use embedder::{EmbedError, Embedder, HttpEmbedder};
pub use generator::{GeminiClient, GenerateError, Generator};
pub use prompt::compose_prompt;
