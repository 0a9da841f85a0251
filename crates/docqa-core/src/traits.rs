use crate::error::Result;
use crate::types::{Document, Embedding, IndexEntry, RetrievalResult};

/// Maps text to a fixed-length vector. Calls may block on a model or the network.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed(&self, text: &str) -> anyhow::Result<Embedding>;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Embedding>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn dim(&self) -> usize { (**self).dim() }
    fn embed(&self, text: &str) -> anyhow::Result<Embedding> { (**self).embed(text) }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Embedding>> { (**self).embed_batch(texts) }
}

impl<E: Embedder + ?Sized> Embedder for std::sync::Arc<E> {
    fn dim(&self) -> usize { (**self).dim() }
    fn embed(&self, text: &str) -> anyhow::Result<Embedding> { (**self).embed(text) }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Embedding>> { (**self).embed_batch(texts) }
}

/// External language model call. Opaque to the core.
pub trait Generator: Send + Sync {
    fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Holds (embedding, segment) entries and answers nearest-neighbour queries.
///
/// Implementations own their synchronisation: `insert`, `query` and `clear`
/// may be called concurrently through a shared reference and must never
/// expose a partially applied entry.
pub trait VectorStore: Send + Sync {
    fn insert(&self, entry: IndexEntry) -> Result<()>;
    /// Entries scoring at least `min_score`, best `top_k` first, ties by insertion order.
    fn query(&self, vector: &[f32], top_k: usize, min_score: f32) -> Result<RetrievalResult>;
    fn clear(&self);
    fn size(&self) -> usize;
}

impl<S: VectorStore + ?Sized> VectorStore for std::sync::Arc<S> {
    fn insert(&self, entry: IndexEntry) -> Result<()> { (**self).insert(entry) }
    fn query(&self, vector: &[f32], top_k: usize, min_score: f32) -> Result<RetrievalResult> {
        (**self).query(vector, top_k, min_score)
    }
    fn clear(&self) { (**self).clear() }
    fn size(&self) -> usize { (**self).size() }
}

/// Supplies already-extracted plain text documents for ingestion.
pub trait DocumentSource {
    fn documents(&self) -> anyhow::Result<Vec<Document>>;
}
