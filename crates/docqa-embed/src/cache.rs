//! Within-process embedding cache keyed by the exact input text.

use anyhow::Result;
use std::collections::{HashMap, VecDeque};
use std::hash::BuildHasherDefault;
use std::sync::{Mutex, PoisonError};
use tracing::debug;
use twox_hash::XxHash64;

use docqa_core::traits::Embedder;
use docqa_core::types::Embedding;

const DEFAULT_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, Embedding, BuildHasherDefault<XxHash64>>,
    // insertion order, oldest first
    order: VecDeque<String>,
    stats: CacheStats,
}

/// Wraps an embedder and remembers its outputs, evicting the oldest entry once full.
///
/// The lock is never held while the wrapped embedder runs, so two callers
/// missing on the same text may both compute it; the second insert wins.
pub struct CachedEmbedder<E> {
    inner: E,
    capacity: usize,
    state: Mutex<CacheState>,
}

impl<E: Embedder> CachedEmbedder<E> {
    pub fn new(inner: E) -> Self { Self::with_capacity(inner, DEFAULT_CAPACITY) }

    pub fn with_capacity(inner: E, capacity: usize) -> Self {
        Self { inner, capacity: capacity.max(1), state: Mutex::new(CacheState::default()) }
    }

    pub fn stats(&self) -> CacheStats { self.lock().stats }

    pub fn len(&self) -> usize { self.lock().entries.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn inner(&self) -> &E { &self.inner }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(&self, text: &str) -> Option<Embedding> {
        let mut state = self.lock();
        match state.entries.get(text).cloned() {
            Some(v) => { state.stats.hits += 1; Some(v) }
            None => { state.stats.misses += 1; None }
        }
    }

    fn store(&self, text: &str, embedding: &Embedding) {
        let mut state = self.lock();
        if state.entries.insert(text.to_string(), embedding.clone()).is_some() {
            return;
        }
        state.order.push_back(text.to_string());
        while state.entries.len() > self.capacity {
            let Some(oldest) = state.order.pop_front() else { break };
            state.entries.remove(&oldest);
            state.stats.evictions += 1;
        }
    }
}

impl<E: Embedder> Embedder for CachedEmbedder<E> {
    fn dim(&self) -> usize { self.inner.dim() }

    fn embed(&self, text: &str) -> Result<Embedding> {
        if let Some(v) = self.lookup(text) { return Ok(v); }
        let v = self.inner.embed(text)?;
        self.store(text, &v);
        Ok(v)
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let mut out: Vec<Option<Embedding>> = texts.iter().map(|t| self.lookup(t)).collect();
        let missing: Vec<usize> = out.iter().enumerate().filter(|(_, v)| v.is_none()).map(|(i, _)| i).collect();
        if !missing.is_empty() {
            let batch: Vec<String> = missing.iter().map(|&i| texts[i].clone()).collect();
            let computed = self.inner.embed_batch(&batch)?;
            if computed.len() != batch.len() {
                anyhow::bail!("embedder returned {} vectors for {} texts", computed.len(), batch.len());
            }
            for (&i, v) in missing.iter().zip(computed) {
                self.store(&texts[i], &v);
                out[i] = Some(v);
            }
            debug!(computed = missing.len(), cached = texts.len() - missing.len(), "embedded batch");
        }
        Ok(out.into_iter().flatten().collect())
    }
}
