//! docqa-core
//!
//! Domain types, error taxonomy, collaborator traits, configuration and the
//! chunker shared by the embedding, vector and retrieval crates.

pub mod chunker;
pub mod config;
pub mod error;
pub mod source;
pub mod traits;
pub mod types;

pub use chunker::Chunker;
pub use config::{Config, RagSettings};
pub use error::{Error, Result};
pub use source::TextDirectorySource;
pub use traits::{DocumentSource, Embedder, Generator, VectorStore};
pub use types::{Document, Embedding, IndexEntry, RetrievalResult, ScoredSegment, Segment, SegmentId};
