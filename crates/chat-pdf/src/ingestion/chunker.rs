//! Text chunking with boundary preference and fixed overlap

use unicode_segmentation::UnicodeSegmentation;

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};
use crate::types::Chunk;

/// Cut-point kinds, tried from coarsest to finest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Paragraph,
    Line,
    Sentence,
    Word,
}

const BOUNDARY_ORDER: [Boundary; 4] = [
    Boundary::Paragraph,
    Boundary::Line,
    Boundary::Sentence,
    Boundary::Word,
];

impl Boundary {
    /// Byte offset just past the last boundary of this kind in `window`.
    /// Offset 0 is never returned.
    fn last_cut(self, window: &str) -> Option<usize> {
        match self {
            Boundary::Paragraph => window.rfind("\n\n").map(|p| p + 2),
            Boundary::Line => window.rfind('\n').map(|p| p + 1),
            Boundary::Sentence => window
                .split_sentence_bound_indices()
                .map(|(i, _)| i)
                .filter(|&i| i > 0)
                .last(),
            Boundary::Word => window
                .char_indices()
                .rev()
                .find(|(_, c)| c.is_whitespace())
                .map(|(i, c)| i + c.len_utf8()),
        }
    }
}

/// Splits text into chunks of at most `chunk_size` characters where
/// consecutive chunks share exactly `overlap` characters.
#[derive(Debug, Clone)]
pub struct TextChunker {
    /// Maximum chunk size in characters
    chunk_size: usize,
    /// Characters shared between consecutive chunks
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker; `overlap` must be smaller than `chunk_size`
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::config("chunk size must be greater than 0"));
        }
        if overlap >= chunk_size {
            return Err(Error::config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                overlap, chunk_size
            )));
        }
        Ok(Self { chunk_size, overlap })
    }

    /// Create from configuration
    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split text into ordered chunks
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every char index, plus the end of the text
        let offsets: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let total_chars = offsets.len() - 1;

        let mut chunks = Vec::new();
        let mut start = 0usize;

        loop {
            let window_end = (start + self.chunk_size).min(total_chars);
            let end = if window_end == total_chars {
                total_chars
            } else {
                self.find_cut(text, &offsets, start, window_end)
            };

            chunks.push(Chunk::new(
                text[offsets[start]..offsets[end]].to_string(),
                start,
                end,
                chunks.len() as u32,
            ));

            if end == total_chars {
                break;
            }

            // end > start + overlap, so the walk always advances
            start = end - self.overlap;
        }

        chunks
    }

    /// Pick the cut for a window that does not reach the end of the text.
    /// Natural boundaries are only accepted in the back half of the window
    /// (and always after the overlap); otherwise the window is cut hard.
    fn find_cut(&self, text: &str, offsets: &[usize], start: usize, window_end: usize) -> usize {
        let earliest = start + self.overlap.max(self.chunk_size / 2);
        let lo = offsets[earliest];
        let hi = offsets[window_end];
        let window = &text[lo..hi];

        for boundary in BOUNDARY_ORDER {
            if let Some(rel) = boundary.last_cut(window) {
                if let Ok(cut) = offsets.binary_search(&(lo + rel)) {
                    tracing::trace!("Cut chunk at {:?} boundary (char {})", boundary, cut);
                    return cut;
                }
            }
        }

        window_end
    }
}
