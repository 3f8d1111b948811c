//! Question-answering pipeline over one uploaded PDF
//!
//! Each call runs the full sequence: extract, chunk, embed, index,
//! retrieve, prompt, generate. The index is built in a directory of its own
//! so concurrent requests never share state.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tempfile::TempDir;

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::generation::{AnswerGenerator, PromptBuilder};
use crate::ingestion::{PdfLoader, TextChunker};
use crate::providers::Providers;
use crate::retrieval::{Retriever, VectorIndex};
use crate::types::{Answer, UploadedPdf};

/// RAG pipeline for single-document questions
#[derive(Clone)]
pub struct RagPipeline {
    chunker: TextChunker,
    providers: Providers,
    retriever: Retriever,
    generator: AnswerGenerator,
    /// Parent directory for per-request index directories
    index_root: PathBuf,
    /// Keep index directories after the request finishes
    retain_index: bool,
}

impl RagPipeline {
    /// Create a pipeline from configuration and providers
    pub fn new(config: &RagConfig, providers: Providers) -> Result<Self> {
        let chunker = TextChunker::from_config(&config.chunking)?;
        let retriever = Retriever::from_config(Arc::clone(&providers.embedder), &config.retrieval);
        let generator = AnswerGenerator::new(Arc::clone(&providers.llm));

        Ok(Self {
            chunker,
            providers,
            retriever,
            generator,
            index_root: config.index.root_dir.clone(),
            retain_index: config.index.retain,
        })
    }

    /// Providers the pipeline runs on
    pub fn providers(&self) -> &Providers {
        &self.providers
    }

    /// Answer `question` from the contents of `pdf`
    pub async fn answer(&self, pdf: &UploadedPdf, question: &str) -> Result<Answer> {
        let start = Instant::now();

        let question = question.trim();
        if question.is_empty() {
            return Err(Error::MissingQuestion);
        }

        tracing::info!(
            "Answering question against {} ({} bytes)",
            pdf.filename,
            pdf.size()
        );

        // Step 1: Extract text
        let document = PdfLoader::load_async(pdf.data.clone()).await?;
        if !document.has_text() {
            return Err(Error::unreadable(format!(
                "No extractable text found in {} ({} pages)",
                pdf.filename,
                document.page_count()
            )));
        }

        // Step 2: Chunk
        let chunks = self.chunker.split(&document.context());
        tracing::info!(
            "Extracted {} pages into {} chunks",
            document.page_count(),
            chunks.len()
        );

        // Step 3: Embed every chunk
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.providers.embedder.embed_batch(&texts).await?;

        // Step 4: Build the request's index
        let workspace = self.index_workspace()?;
        let index_dir = workspace.path().to_path_buf();
        let index = tokio::task::spawn_blocking(move || {
            VectorIndex::build(chunks, embeddings, &index_dir)
        })
        .await
        .map_err(|e| Error::internal(format!("Index build task failed: {}", e)))??;

        // Step 5: Retrieve
        let retrieved = self.retriever.retrieve(&index, question).await?;

        // Step 6: Prompt
        let prompt = PromptBuilder::build(&retrieved, question);

        // Step 7: Generate
        let mut answer = self.generator.generate(&prompt, retrieved.len()).await?;
        answer.processing_time_ms = start.elapsed().as_millis() as u64;

        if self.retain_index {
            tracing::debug!("Keeping index at {}", index.dir().display());
        }

        tracing::info!(
            "Answered in {}ms using {} chunks",
            answer.processing_time_ms,
            answer.chunks_used
        );

        Ok(answer)
    }

    /// Fresh directory under the index root, removed on drop unless retained
    fn index_workspace(&self) -> Result<TempDir> {
        std::fs::create_dir_all(&self.index_root)?;
        let workspace = tempfile::Builder::new()
            .prefix("request-")
            .keep(self.retain_index)
            .tempdir_in(&self.index_root)?;
        Ok(workspace)
    }
}
