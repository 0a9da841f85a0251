//! docqa-vector
//!
//! In-memory vector storage with exact cosine nearest-neighbour search.

pub mod memory;
pub mod similarity;

pub use memory::InMemoryVectorStore;
pub use similarity::{cosine_similarity, relevance_score};
