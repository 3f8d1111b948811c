//! On-disk vector index with exact cosine search

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{Chunk, ScoredChunk};

/// File holding the index inside its persist directory
pub const INDEX_FILE: &str = "index.json";

const INDEX_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

#[derive(Serialize, Deserialize)]
struct IndexFile {
    version: u32,
    dimensions: usize,
    built_at: DateTime<Utc>,
    entries: Vec<IndexEntry>,
}

/// Chunk vectors and texts persisted to a directory
#[derive(Debug)]
pub struct VectorIndex {
    /// Directory the index lives in
    dir: PathBuf,
    /// Embedding dimensions (0 for an empty index)
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Build an index from chunks and their embeddings, replacing any index
    /// already stored in `persist_dir`.
    pub fn build(chunks: Vec<Chunk>, embeddings: Vec<Vec<f32>>, persist_dir: &Path) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            return Err(Error::index(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        let dimensions = embeddings.first().map(Vec::len).unwrap_or(0);
        if embeddings.iter().any(|e| e.is_empty() || e.len() != dimensions) {
            return Err(Error::index(format!(
                "Embeddings must all have {} non-zero dimensions",
                dimensions
            )));
        }

        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect();

        let index = Self {
            dir: persist_dir.to_path_buf(),
            dimensions,
            entries,
        };
        index.persist()?;

        tracing::debug!(
            "Built vector index with {} entries ({} dims) at {}",
            index.len(),
            index.dimensions,
            index.dir.display()
        );

        Ok(index)
    }

    /// Open an index previously written by `build`
    pub fn open(persist_dir: &Path) -> Result<Self> {
        let path = persist_dir.join(INDEX_FILE);
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::index(format!("Failed to read {}: {}", path.display(), e)))?;
        let file: IndexFile = serde_json::from_str(&content)?;

        if file.version != INDEX_VERSION {
            return Err(Error::index(format!(
                "Unsupported index version {}",
                file.version
            )));
        }

        Ok(Self {
            dir: persist_dir.to_path_buf(),
            dimensions: file.dimensions,
            entries: file.entries,
        })
    }

    /// Write the index file (temp file + rename)
    fn persist(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let file = IndexFile {
            version: INDEX_VERSION,
            dimensions: self.dimensions,
            built_at: Utc::now(),
            entries: self.entries.clone(),
        };

        let tmp_path = self.dir.join(format!("{}.tmp", INDEX_FILE));
        fs::write(&tmp_path, serde_json::to_vec(&file)?)?;
        fs::rename(&tmp_path, self.dir.join(INDEX_FILE))?;
        Ok(())
    }

    /// The `k` chunks closest to `query`, nearest first
    pub fn query(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        if k == 0 || self.entries.is_empty() {
            return Ok(Vec::new());
        }

        if query.len() != self.dimensions {
            return Err(Error::index(format!(
                "Query has {} dimensions, index has {}",
                query.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, cosine_similarity(query, &entry.embedding)))
            .collect();

        // Stable sort: equal scores keep insertion order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(i, similarity)| ScoredChunk {
                chunk: self.entries[i].chunk.clone(),
                similarity,
            })
            .collect())
    }

    /// Number of stored chunks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Directory the index is persisted in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Iterate over stored chunks in insertion order
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.entries.iter().map(|e| &e.chunk)
    }
}

/// Cosine similarity; 0.0 for mismatched lengths or zero vectors
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
