//! Embedder implementations for the retrieval core.
//!
//! `HashEmbedder` is a deterministic feature-hashing embedder that needs no
//! model files; it backs tests and offline development. With the
//! `local-model` feature a sentence-transformer checkpoint can be loaded
//! through candle (see `local`).

use anyhow::{anyhow, Result};
use std::hash::{Hash, Hasher};
use tracing::info;
use twox_hash::XxHash64;

use docqa_core::traits::Embedder;
use docqa_core::types::Embedding;

pub mod cache;
#[cfg(feature = "local-model")]
pub mod device;
#[cfg(feature = "local-model")]
pub mod local;
#[cfg(feature = "local-model")]
pub mod pool;
#[cfg(feature = "local-model")]
pub mod tokenize;

pub use cache::{CacheStats, CachedEmbedder};
#[cfg(feature = "local-model")]
pub use local::LocalModelEmbedder;
#[cfg(feature = "local-model")]
pub use pool::masked_mean_l2;

/// Dimensionality of all-MiniLM-L6-v2, also used as the hashing default.
pub const DEFAULT_DIM: usize = 384;

/// Bag-of-words feature hashing, L2-normalised.
///
/// Identical text always maps to the identical vector. Texts sharing words
/// land close to each other, which is enough to exercise retrieval end to end.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 { return Err(anyhow!("embedding dimension must be positive")); }
        Ok(Self { dim })
    }
}

impl Default for HashEmbedder {
    fn default() -> Self { Self { dim: DEFAULT_DIM } }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize { self.dim }

    fn embed(&self, text: &str) -> Result<Embedding> {
        let mut v = vec![0f32; self.dim];
        let tokens = text
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
            .filter(|t| !t.is_empty());
        for (i, token) in tokens.enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h % self.dim as u64) as usize;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v { *x /= norm; }
        Ok(v)
    }
}

/// Pick the embedder named by `APP_EMBEDDER` (`hash` by default, or `local`).
pub fn get_default_embedder(dim: usize) -> Result<Box<dyn Embedder>> {
    let kind = std::env::var("APP_EMBEDDER").unwrap_or_else(|_| "hash".to_string());
    match kind.to_ascii_lowercase().as_str() {
        "hash" | "fake" => {
            info!(dim, "using feature-hashing embedder");
            Ok(Box::new(HashEmbedder::new(dim)?))
        }
        "local" => local_embedder(),
        other => Err(anyhow!("unknown embedder '{}', expected 'hash' or 'local'", other)),
    }
}

#[cfg(feature = "local-model")]
fn local_embedder() -> Result<Box<dyn Embedder>> {
    Ok(Box::new(LocalModelEmbedder::new()?))
}

#[cfg(not(feature = "local-model"))]
fn local_embedder() -> Result<Box<dyn Embedder>> {
    Err(anyhow!("the local model embedder requires building with the `local-model` feature"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_and_case_do_not_change_the_vector() {
        let e = HashEmbedder::new(64).unwrap();
        assert_eq!(e.embed("Fire, Water!").unwrap(), e.embed("fire water").unwrap());
    }

    #[test]
    fn zero_dimension_rejected() {
        assert!(HashEmbedder::new(0).is_err());
    }
}
