use std::sync::Arc;
use tracing::{info, warn};

use docqa_core::chunker::Chunker;
use docqa_core::config::RagSettings;
use docqa_core::error::{Error, Result};
use docqa_core::traits::{Embedder, VectorStore};
use docqa_core::types::{Document, IndexEntry};

/// Chunk, embed and store one document at a time.
///
/// Not transactional: when embedding fails at segment `n`, segments
/// `0..n` stay in the store and the error carries position `n`.
pub struct IngestionPipeline {
    chunker: Chunker,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl IngestionPipeline {
    pub fn new(chunker: Chunker, embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self { chunker, embedder, store }
    }

    /// Fails fast with `InvalidConfig` on unusable chunking parameters.
    pub fn from_settings(settings: &RagSettings, embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Result<Self> {
        Ok(Self::new(Chunker::from_settings(settings)?, embedder, store))
    }

    pub fn chunker(&self) -> &Chunker { &self.chunker }

    /// Returns the number of segments stored for this document.
    pub fn ingest(&self, document: Document) -> Result<usize> {
        let segments = self.chunker.split(&document);
        let total = segments.len();
        for segment in segments {
            let embedding = match self.embedder.embed(&segment.text) {
                Ok(v) => v,
                Err(source) => {
                    warn!(source_id = %document.source_id, position = segment.position, total, "embedding failed, aborting ingestion");
                    return Err(Error::SegmentEmbedding { source_id: document.source_id, position: segment.position, source });
                }
            };
            self.store.insert(IndexEntry { embedding, segment })?;
        }
        info!(source_id = %document.source_id, segments = total, "document ingested");
        Ok(total)
    }
}
