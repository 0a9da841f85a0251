//! Brute-force in-memory vector store.
//!
//! Every query scans all entries (O(n·D)). The store is a pure function of its
//! contents, so an approximate index can replace it behind [`VectorStore`].

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

use docqa_core::error::{Error, Result};
use docqa_core::traits::VectorStore;
use docqa_core::types::{IndexEntry, RetrievalResult, ScoredSegment};

use crate::similarity::{cosine_similarity, relevance_score};

#[derive(Default)]
struct Entries {
    items: Vec<IndexEntry>,
    dim: Option<usize>,
}

/// Append-only store guarded by a reader/writer lock.
///
/// Embedding happens before the lock is taken, so the critical sections only
/// cover the append and the scan.
#[derive(Default)]
pub struct InMemoryVectorStore {
    entries: RwLock<Entries>,
    // Dimensionality fixed at construction; survives `clear`.
    pinned_dim: Option<usize>,
}

impl InMemoryVectorStore {
    /// The first insert establishes the dimensionality.
    pub fn new() -> Self { Self::default() }

    /// Only vectors of exactly `dim` components are accepted.
    pub fn with_dimension(dim: usize) -> Self {
        Self { entries: RwLock::new(Entries { items: Vec::new(), dim: Some(dim) }), pinned_dim: Some(dim) }
    }

    /// Dimensionality currently enforced, if any.
    pub fn dim(&self) -> Option<usize> { self.read().dim }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VectorStore for InMemoryVectorStore {
    fn insert(&self, entry: IndexEntry) -> Result<()> {
        let actual = entry.embedding.len();
        if actual == 0 { return Err(Error::EmptyEmbedding); }
        let mut entries = self.write();
        match entries.dim {
            Some(expected) if expected != actual => return Err(Error::DimensionMismatch { expected, actual }),
            Some(_) => {}
            None => entries.dim = Some(actual),
        }
        debug!(id = %entry.segment.id, "inserting entry");
        entries.items.push(entry);
        Ok(())
    }

    fn query(&self, vector: &[f32], top_k: usize, min_score: f32) -> Result<RetrievalResult> {
        let entries = self.read();
        if entries.items.is_empty() { return Ok(RetrievalResult::empty()); }
        if let Some(expected) = entries.dim {
            if expected != vector.len() {
                return Err(Error::DimensionMismatch { expected, actual: vector.len() });
            }
        }
        if top_k == 0 { return Ok(RetrievalResult::empty()); }

        let mut scored: Vec<(usize, f32)> = entries
            .items
            .iter()
            .enumerate()
            .map(|(i, e)| (i, relevance_score(cosine_similarity(vector, &e.embedding))))
            .filter(|&(_, score)| score >= min_score)
            .collect();
        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_k);
        debug!(scanned = entries.items.len(), returned = scored.len(), min_score, "vector query");

        let hits = scored
            .into_iter()
            .map(|(i, score)| ScoredSegment { segment: entries.items[i].segment.clone(), score })
            .collect();
        Ok(RetrievalResult::from_sorted(hits))
    }

    fn clear(&self) {
        let mut entries = self.write();
        let dropped = entries.items.len();
        *entries = Entries { items: Vec::new(), dim: self.pinned_dim };
        info!(dropped, "vector store cleared");
    }

    fn size(&self) -> usize { self.read().items.len() }
}
