use docqa_core::traits::Embedder;
use docqa_embed::get_default_embedder;

fn main() -> anyhow::Result<()> {
    let embedder = get_default_embedder(docqa_embed::DEFAULT_DIM)?;
    let texts = vec!["how to start a campfire".to_string(), "starting a fire in the rain".to_string()];
    let embs = embedder.embed_batch(&texts)?;
    let dot: f32 = embs[0].iter().zip(&embs[1]).map(|(a, b)| a * b).sum();
    println!("B={} dim={} cosine={:.4}", embs.len(), embedder.dim(), dot);
    Ok(())
}
