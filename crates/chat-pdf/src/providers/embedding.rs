//! Embedding provider trait for generating text embeddings

use async_trait::async_trait;

use crate::error::Result;

/// Trait for generating text embeddings
///
/// Implementations:
/// - `GeminiEmbedder`: Google Generative Language API (embedding-001)
/// - `OllamaEmbedder`: Local Ollama server (nomic-embed-text)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a document chunk
    async fn embed_document(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate an embedding for a question
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple chunks, preserving order
    ///
    /// Default implementation calls `embed_document` sequentially.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed_document(text).await?);
        }
        Ok(embeddings)
    }

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model in use
    fn model(&self) -> &str;
}
