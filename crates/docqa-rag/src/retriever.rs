use std::sync::Arc;
use tracing::debug;

use docqa_core::error::{Error, Result};
use docqa_core::traits::{Embedder, VectorStore};
use docqa_core::types::RetrievalResult;

/// Embeds a question and looks up its nearest segments.
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self { Self { embedder, store } }

    /// An empty result means nothing cleared `min_score`; it is not an error.
    pub fn retrieve(&self, question: &str, top_k: usize, min_score: f32) -> Result<RetrievalResult> {
        // Embed before touching the store so its lock is never held across the call.
        let query_vec = self.embedder.embed(question).map_err(Error::Embedding)?;
        let result = self.store.query(&query_vec, top_k, min_score)?;
        debug!(hits = result.len(), top_k, min_score, "retrieved segments");
        Ok(result)
    }
}
