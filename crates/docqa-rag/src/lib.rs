//! docqa-rag
//!
//! Retrieval-augmented question answering over ingested documents:
//! ingestion (chunk, embed, store), retrieval (embed, query, threshold),
//! prompt assembly and the `RagService` facade tying them to a generator.

pub mod context;
pub mod ingest;
pub mod retriever;
pub mod service;

pub use context::{ContextAssembler, NO_RELEVANT_DOCUMENTS};
pub use ingest::IngestionPipeline;
pub use retriever::Retriever;
pub use service::{Answer, RagService};
