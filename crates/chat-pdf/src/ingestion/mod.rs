//! Document loading and chunking

mod chunker;
mod loader;

pub use chunker::TextChunker;
pub use loader::{ExtractedDocument, PdfLoader};
