//! Fixed-window character chunking with overlap.

use crate::config::RagSettings;
use crate::error::{Error, Result};
use crate::types::{Document, Segment};

#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    chunk_size: usize,
    overlap: usize,
}

impl Chunker {
    /// Fails with `InvalidConfig` unless `chunk_size >= 1` and `overlap < chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size < 1 {
            return Err(Error::InvalidConfig("chunk_size must be at least 1".to_string()));
        }
        if overlap >= chunk_size {
            return Err(Error::InvalidConfig(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                overlap, chunk_size
            )));
        }
        Ok(Self { chunk_size, overlap })
    }

    pub fn from_settings(settings: &RagSettings) -> Result<Self> {
        Self::new(settings.chunk_size, settings.overlap)
    }

    pub fn chunk_size(&self) -> usize { self.chunk_size }

    pub fn overlap(&self) -> usize { self.overlap }

    /// Windows of `chunk_size` characters advancing by `chunk_size - overlap`.
    /// The last window may be shorter. Empty text yields no segments.
    pub fn split(&self, document: &Document) -> Vec<Segment> {
        self.split_text(&document.raw_text)
            .into_iter()
            .enumerate()
            .map(|(position, text)| Segment::new(&document.source_id, position, text))
            .collect()
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        // Char boundaries as byte offsets, plus the end of the string.
        let bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect();
        let total_chars = bounds.len() - 1;
        let step = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;
        while start < total_chars {
            let end = (start + self.chunk_size).min(total_chars);
            chunks.push(text[bounds[start]..bounds[end]].to_string());
            if end == total_chars { break; }
            start += step;
        }
        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self { chunk_size: crate::config::DEFAULT_CHUNK_SIZE, overlap: crate::config::DEFAULT_OVERLAP }
    }
}
