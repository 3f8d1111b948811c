//! Core types for the question-answering pipeline

pub mod document;
pub mod response;

pub use document::{Chunk, ScoredChunk, UploadedPdf};
pub use response::{Answer, NO_ANSWER, SENTINEL_ANSWER};
