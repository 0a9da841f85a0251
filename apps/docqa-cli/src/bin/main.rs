use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use docqa_core::config::{expand_path, Config};
use docqa_core::traits::{DocumentSource, Embedder, Generator};
use docqa_core::{Chunker, Document, RagSettings, TextDirectorySource};
use docqa_embed::{get_default_embedder, CachedEmbedder, DEFAULT_DIM};
use docqa_rag::RagService;

/// Ask questions answered only from a folder of plain-text documents.
#[derive(Parser, Debug)]
#[command(name = "docqa", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest a directory and print the grounded prompt for a question
    Ask {
        question: String,
        /// Directory of .txt files (defaults to `data.docs_dir`)
        #[arg(long)]
        docs: Option<PathBuf>,
        /// Only ingest the first N files
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Ingest a directory and list the segments retrieved for a question
    Search {
        question: String,
        #[arg(long)]
        docs: Option<PathBuf>,
        #[arg(long)]
        top_k: Option<usize>,
        #[arg(long)]
        min_score: Option<f32>,
    },
    /// Show how a file would be chunked
    Chunk { file: PathBuf },
}

/// Stands in for the external language model: hands the prompt back unchanged.
struct PromptEcho;

impl Generator for PromptEcho {
    fn generate(&self, prompt: &str) -> Result<String> { Ok(prompt.to_string()) }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}

fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    let dim: usize = config.get_or("embedding.dim", DEFAULT_DIM)?;
    let capacity: usize = config.get_or("embedding.cache_capacity", 10_000)?;
    let inner = get_default_embedder(dim)?;
    Ok(Arc::new(CachedEmbedder::with_capacity(inner, capacity)))
}

fn docs_dir(config: &Config, docs: Option<PathBuf>) -> Result<PathBuf> {
    match docs {
        Some(dir) => Ok(dir),
        None => Ok(expand_path(config.get_or("data.docs_dir", "docs".to_string())?)),
    }
}

fn ingest(service: &RagService, source: &dyn DocumentSource) -> Result<()> {
    let documents = source.documents().context("Failed to load documents")?;
    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents {msg}")?
            .progress_chars("#>-"),
    );
    let mut segments = 0usize;
    for document in documents {
        pb.set_message(document.source_id.clone());
        segments += service.load_document(document)?;
        pb.inc(1);
    }
    pb.finish_and_clear();
    info!(segments, "ingestion complete");
    Ok(())
}

fn build_service(config: &Config, settings: RagSettings, docs: Option<PathBuf>, limit: Option<usize>) -> Result<RagService> {
    let service = RagService::new(settings, build_embedder(config)?, Arc::new(PromptEcho))?;
    let mut source = TextDirectorySource::new(docs_dir(config, docs)?);
    if let Some(limit) = limit { source = source.with_limit(limit); }
    println!("Ingesting from {}", source.root().display());
    ingest(&service, &source)?;
    println!("{} segments indexed", service.segment_count());
    Ok(service)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = Config::load().context("Error loading config")?;
    let settings = config.rag_settings()?;

    match args.command {
        Command::Ask { question, docs, limit } => {
            let service = build_service(&config, settings, docs, limit)?;
            let answer = service.answer(&question)?;
            if answer.generated {
                for (i, hit) in answer.sources.iter().enumerate() {
                    println!("  {}. score={:.4}  {}", i + 1, hit.score, hit.segment.id);
                }
                println!();
            }
            println!("{}", answer.text);
        }
        Command::Search { question, docs, top_k, min_score } => {
            let settings = RagSettings {
                top_k: top_k.unwrap_or(settings.top_k),
                min_score: min_score.unwrap_or(settings.min_score),
                ..settings
            };
            let service = build_service(&config, settings, docs, None)?;
            let results = service.retrieve(&question)?;
            println!("Found {} results for: \"{}\"", results.len(), question);
            for (i, hit) in results.iter().enumerate() {
                println!("\n  {}. score={:.4}  id={}", i + 1, hit.score, hit.segment.id);
                println!("     {}", hit.segment.text.replace('\n', " "));
            }
        }
        Command::Chunk { file } => {
            let text = std::fs::read_to_string(&file).with_context(|| format!("Failed to read {}", file.display()))?;
            let chunker = Chunker::from_settings(&settings)?;
            let segments = chunker.split(&Document::new(file.display().to_string(), text));
            println!("{} segments (chunk_size={}, overlap={})", segments.len(), chunker.chunk_size(), chunker.overlap());
            for s in &segments {
                println!("--- {} ({} chars)\n{}", s.id, s.text.chars().count(), s.text);
            }
        }
    }
    Ok(())
}
