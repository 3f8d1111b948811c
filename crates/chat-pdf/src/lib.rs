//! chat-pdf: ask questions about an uploaded PDF
//!
//! Each question runs a retrieval-augmented pipeline over the uploaded
//! document: text extraction, overlapping chunking, embeddings, an on-disk
//! vector index, top-k retrieval and a grounded LLM answer. The answer is
//! served back through a single HTML form.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use pipeline::RagPipeline;
pub use types::{Answer, Chunk, UploadedPdf};
