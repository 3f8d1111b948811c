//! Vector index and similarity retrieval

mod index;
mod retriever;

pub use index::{VectorIndex, INDEX_FILE};
pub use retriever::Retriever;
