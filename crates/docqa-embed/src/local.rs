//! Sentence-transformer embedder (all-MiniLM-L6-v2 layout) running on candle.
//!
//! The model directory must contain `tokenizer.json`, `config.json` and
//! `model.safetensors`. It is located through `APP_MODEL_DIR`, then
//! `MODEL_DIR`, then `models/all-minilm-l6-v2`.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::Tokenizer;

use docqa_core::traits::Embedder;
use docqa_core::types::Embedding;

use crate::device::select_device;
use crate::pool::masked_mean_l2;
use crate::tokenize::tokenize_on_device;

const MAX_LEN: usize = 256;

pub struct LocalModelEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dim: usize,
}

impl LocalModelEmbedder {
    pub fn new() -> Result<Self> {
        Self::from_dir(&resolve_model_dir()?)
    }

    pub fn from_dir(model_dir: &Path) -> Result<Self> {
        let device = select_device();
        info!(dir = %model_dir.display(), "loading embedding model");
        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e))?;
        let config_path = model_dir.join("config.json");
        let config: BertConfig = serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;
        let weights = candle_core::safetensors::load(model_dir.join("model.safetensors"), &device)?;
        let vb = VarBuilder::from_tensors(weights, DType::F32, &device);
        let model = BertModel::load(vb, &config)?;
        let dim = config.hidden_size;
        info!(dim, "embedding model loaded");
        Ok(Self { model, tokenizer, device, dim })
    }
}

impl Embedder for LocalModelEmbedder {
    fn dim(&self) -> usize { self.dim }

    fn embed(&self, text: &str) -> Result<Embedding> {
        let start = Instant::now();
        let (input_ids, attention_mask) = tokenize_on_device(&self.tokenizer, text, MAX_LEN, &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;
        let hidden = self.model.forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = masked_mean_l2(&hidden, &attention_mask)?;
        let v: Vec<f32> = pooled.to_device(&Device::Cpu)?.squeeze(0)?.to_vec1()?;
        if v.len() != self.dim {
            return Err(anyhow!("model produced {} dimensions, expected {}", v.len(), self.dim));
        }
        let elapsed = start.elapsed();
        if elapsed.as_millis() > 100 { warn!(ms = elapsed.as_millis() as u64, "slow embedding"); }
        else { debug!(ms = elapsed.as_millis() as u64, "embedded text"); }
        Ok(v)
    }
}

fn resolve_model_dir() -> Result<PathBuf> {
    for var in ["APP_MODEL_DIR", "MODEL_DIR"] {
        if let Ok(dir) = std::env::var(var) {
            let p = docqa_core::config::expand_path(&dir);
            if p.exists() { return Ok(p); }
            warn!(var, dir = %p.display(), "model directory does not exist");
        }
    }
    let default = Path::new("models/all-minilm-l6-v2");
    if default.exists() { return Ok(default.to_path_buf()); }
    Err(anyhow!("Could not locate embedding model directory; set APP_MODEL_DIR"))
}
