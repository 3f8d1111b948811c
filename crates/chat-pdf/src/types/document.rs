//! Document and chunk types

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A PDF received from the upload form
#[derive(Debug, Clone)]
pub struct UploadedPdf {
    /// Filename reported by the browser
    pub filename: String,
    /// Raw file bytes
    pub data: Bytes,
}

impl UploadedPdf {
    /// Create an upload from its filename and bytes
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// Size of the upload in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A bounded segment of the extracted document text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content
    pub content: String,
    /// Character position in the extracted text
    pub char_start: usize,
    pub char_end: usize,
    /// Chunk index within the document
    pub chunk_index: u32,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(content: String, char_start: usize, char_end: usize, chunk_index: u32) -> Self {
        Self {
            content,
            char_start,
            char_end,
            chunk_index,
        }
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.char_end - self.char_start
    }
}

/// Chunk returned from a similarity query
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The matched chunk
    pub chunk: Chunk,
    /// Cosine similarity to the query (-1.0 to 1.0, higher is closer)
    pub similarity: f32,
}
