use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Embedding failed: {0}")]
    Embedding(#[source] anyhow::Error),

    #[error("Embedding failed for segment {position} of '{source_id}': {source}")]
    SegmentEmbedding {
        source_id: String,
        position: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("Dimension mismatch: store holds {expected}-dimensional vectors, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding has no dimensions")]
    EmptyEmbedding,

    #[error("Document source failed: {0}")]
    Source(#[source] anyhow::Error),

    #[error("Generation failed: {0}")]
    Generation(#[source] anyhow::Error),
}

impl Error {
    /// True for failures raised by the embedder, on either the ingestion or the retrieval path.
    pub fn is_embedding(&self) -> bool {
        matches!(self, Error::Embedding(_) | Error::SegmentEmbedding { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
