//! Domain types shared by the chunker, the vector store and the retrieval path.

use serde::{Deserialize, Serialize};

pub type SegmentId = String;

/// Fixed-length vector produced by an [`crate::traits::Embedder`].
pub type Embedding = Vec<f32>;

/// A contiguous slice of a document's text, the unit of embedding and retrieval.
///
/// - `id`: `"{source_id}:{position}"`
/// - `source_id`: identity of the document the text was cut from
/// - `position`: 0-based index of the segment within its document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub text: String,
    pub source_id: String,
    pub position: usize,
}

impl Segment {
    pub fn new(source_id: &str, position: usize, text: String) -> Self {
        Self { id: format!("{}:{}", source_id, position), text, source_id: source_id.to_string(), position }
    }
}

/// The unit stored and searched by a vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub embedding: Embedding,
    pub segment: Segment,
}

/// Raw input to ingestion. Consumed by chunking and not retained afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub source_id: String,
    pub raw_text: String,
}

impl Document {
    pub fn new(source_id: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self { source_id: source_id.into(), raw_text: raw_text.into() }
    }
}

/// A retrieved segment with its similarity score in `[0, 1]`. Higher is better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSegment {
    pub segment: Segment,
    pub score: f32,
}

/// Ordered retrieval hits, descending by score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "UnorderedHits")]
pub struct RetrievalResult {
    hits: Vec<ScoredSegment>,
}

// Deserialized hits are re-sorted so the ordering holds for any input.
#[derive(Deserialize)]
struct UnorderedHits {
    hits: Vec<ScoredSegment>,
}

impl From<UnorderedHits> for RetrievalResult {
    fn from(raw: UnorderedHits) -> Self {
        let mut hits = raw.hits;
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self { hits }
    }
}

impl RetrievalResult {
    pub fn empty() -> Self { Self::default() }

    /// Callers are expected to pass hits already sorted by non-increasing score.
    pub fn from_sorted(hits: Vec<ScoredSegment>) -> Self {
        debug_assert!(hits.windows(2).all(|w| w[0].score >= w[1].score), "hits must be sorted by score");
        Self { hits }
    }

    pub fn len(&self) -> usize { self.hits.len() }

    pub fn is_empty(&self) -> bool { self.hits.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredSegment> { self.hits.iter() }

    pub fn hits(&self) -> &[ScoredSegment] { &self.hits }

    pub fn into_hits(self) -> Vec<ScoredSegment> { self.hits }
}

impl<'a> IntoIterator for &'a RetrievalResult {
    type Item = &'a ScoredSegment;
    type IntoIter = std::slice::Iter<'a, ScoredSegment>;

    fn into_iter(self) -> Self::IntoIter { self.hits.iter() }
}
