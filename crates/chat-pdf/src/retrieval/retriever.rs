//! Question-to-chunks retrieval

use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::error::Result;
use crate::providers::EmbeddingProvider;
use crate::types::ScoredChunk;

use super::VectorIndex;

/// Embeds a question and pulls the nearest chunks from an index
#[derive(Clone)]
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl Retriever {
    /// Create a retriever returning at most `top_k` chunks
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, top_k: usize) -> Self {
        Self { embedder, top_k }
    }

    /// Create from configuration
    pub fn from_config(embedder: Arc<dyn EmbeddingProvider>, config: &RetrievalConfig) -> Self {
        Self::new(embedder, config.top_k)
    }

    /// Retrieve the chunks most similar to `question`, nearest first
    pub async fn retrieve(&self, index: &VectorIndex, question: &str) -> Result<Vec<ScoredChunk>> {
        let query_embedding = self.embedder.embed_query(question).await?;
        let results = index.query(&query_embedding, self.top_k)?;

        tracing::debug!(
            "Retrieved {} of {} chunks (best similarity {:.3})",
            results.len(),
            index.len(),
            results.first().map(|r| r.similarity).unwrap_or(0.0)
        );

        Ok(results)
    }
}
