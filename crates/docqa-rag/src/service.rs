//! Question answering facade: load documents, answer from them, report and reset the store.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use docqa_core::config::RagSettings;
use docqa_core::error::{Error, Result};
use docqa_core::traits::{DocumentSource, Embedder, Generator, VectorStore};
use docqa_core::types::{Document, RetrievalResult, ScoredSegment};
use docqa_vector::InMemoryVectorStore;

use crate::context::ContextAssembler;
use crate::ingest::IngestionPipeline;
use crate::retriever::Retriever;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    /// Segments the answer was grounded on, best first.
    pub sources: Vec<ScoredSegment>,
    /// False when the "no relevant documents" reply was returned without calling the generator.
    pub generated: bool,
}

pub struct RagService {
    settings: RagSettings,
    store: Arc<dyn VectorStore>,
    pipeline: IngestionPipeline,
    retriever: Retriever,
    assembler: ContextAssembler,
    generator: Arc<dyn Generator>,
}

impl RagService {
    /// Service over a fresh in-memory store.
    pub fn new(settings: RagSettings, embedder: Arc<dyn Embedder>, generator: Arc<dyn Generator>) -> Result<Self> {
        Self::with_store(settings, embedder, Arc::new(InMemoryVectorStore::new()), generator)
    }

    pub fn with_store(
        settings: RagSettings,
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        generator: Arc<dyn Generator>,
    ) -> Result<Self> {
        settings.validate()?;
        let pipeline = IngestionPipeline::from_settings(&settings, Arc::clone(&embedder), Arc::clone(&store))?;
        let retriever = Retriever::new(embedder, Arc::clone(&store));
        Ok(Self { settings, store, pipeline, retriever, assembler: ContextAssembler::new(), generator })
    }

    pub fn settings(&self) -> &RagSettings { &self.settings }

    pub fn load_document(&self, document: Document) -> Result<usize> {
        self.pipeline.ingest(document)
    }

    /// Ingest every document from `source`, stopping at the first failure.
    pub fn load_from(&self, source: &dyn DocumentSource) -> Result<usize> {
        let documents = source.documents().map_err(Error::Source)?;
        let mut segments = 0;
        for document in documents {
            segments += self.load_document(document)?;
        }
        Ok(segments)
    }

    pub fn retrieve(&self, question: &str) -> Result<RetrievalResult> {
        self.retriever.retrieve(question, self.settings.top_k, self.settings.min_score)
    }

    /// The prompt that `answer` would send to the generator, and the segments behind it.
    pub fn prompt_for(&self, question: &str) -> Result<(String, RetrievalResult)> {
        let results = self.retrieve(question)?;
        Ok((self.assembler.assemble(question, &results), results))
    }

    pub fn answer(&self, question: &str) -> Result<Answer> {
        let (prompt, results) = self.prompt_for(question)?;
        if results.is_empty() {
            info!("no segment cleared the score floor, skipping generation");
            return Ok(Answer { text: prompt, sources: Vec::new(), generated: false });
        }
        let text = self.generator.generate(&prompt).map_err(Error::Generation)?;
        Ok(Answer { text, sources: results.into_hits(), generated: true })
    }

    pub fn segment_count(&self) -> usize { self.store.size() }

    pub fn clear_documents(&self) { self.store.clear() }
}
