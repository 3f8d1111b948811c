//! Provider abstractions for embeddings and LLM generation
//!
//! Trait-based so the pipeline can switch between the hosted Gemini backend
//! and a local Ollama server.

pub mod embedding;
pub mod gemini;
pub mod llm;
pub mod ollama;

use std::sync::Arc;

use crate::config::{BackendProvider, RagConfig};
use crate::error::Result;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;

/// The embedding and generation providers a pipeline runs on
#[derive(Clone)]
pub struct Providers {
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub llm: Arc<dyn LlmProvider>,
}

impl Providers {
    /// Bundle existing providers
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, llm: Arc<dyn LlmProvider>) -> Self {
        Self { embedder, llm }
    }

    /// Build providers for the configured backend.
    ///
    /// Fails with `MissingCredential` when the backend needs an API key that
    /// was not found in the environment.
    pub fn from_config(config: &RagConfig) -> Result<Self> {
        match config.backend {
            BackendProvider::Gemini => {
                let api_key = config.api_key().ok_or_else(|| config.missing_credential())?;
                let embedder = gemini::GeminiEmbedder::new(&config.gemini, api_key)?;
                let llm = gemini::GeminiLlm::new(&config.gemini, api_key)?;
                Ok(Self::new(Arc::new(embedder), Arc::new(llm)))
            }
            BackendProvider::Ollama => {
                let (embedder, llm) = ollama::providers(&config.ollama)?;
                Ok(Self::new(Arc::new(embedder), Arc::new(llm)))
            }
        }
    }
}
