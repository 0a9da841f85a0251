use std::sync::{Arc, Barrier};

use docqa_core::traits::{Embedder, VectorStore};
use docqa_core::types::{IndexEntry, Segment};
use docqa_core::Error;
use docqa_embed::HashEmbedder;
use docqa_vector::InMemoryVectorStore;

fn entry(source: &str, position: usize, embedding: Vec<f32>) -> IndexEntry {
    IndexEntry { embedding, segment: Segment::new(source, position, format!("{source} #{position}")) }
}

fn seeded(n: usize, dim: usize) -> InMemoryVectorStore {
    let store = InMemoryVectorStore::new();
    for i in 0..n {
        // Deterministic pseudo-random components in [-1, 1].
        let v: Vec<f32> = (0..dim).map(|d| (((i * 31 + d * 17) % 23) as f32 / 11.0) - 1.0).collect();
        store.insert(entry("doc", i, v)).expect("insert");
    }
    store
}

#[test]
fn empty_store_returns_empty_result() {
    let store = InMemoryVectorStore::new();
    let result = store.query(&[1.0, 2.0, 3.0], 3, 0.0).expect("query");
    assert!(result.is_empty());
    assert_eq!(store.size(), 0);
}

#[test]
fn identical_embedding_scores_one() {
    let store = InMemoryVectorStore::new();
    let v = vec![0.2, -0.4, 0.9, 0.1];
    store.insert(entry("manual", 0, v.clone())).expect("insert");
    let result = store.query(&v, 3, 1.0).expect("query");
    assert_eq!(result.len(), 1);
    assert!((result.hits()[0].score - 1.0).abs() < 1e-6);
}

#[test]
fn identical_embedding_scores_one_at_extreme_magnitudes() {
    for magnitude in [1e10f32, 1e20, 1e30, 1e-20, 1e-25, 1e-40] {
        let store = InMemoryVectorStore::new();
        let v = vec![magnitude, magnitude, -magnitude * 0.5];
        store.insert(entry("scaled", 0, v.clone())).expect("insert");
        let result = store.query(&v, 3, 0.0).expect("query");
        assert_eq!(result.len(), 1, "entry dropped at magnitude {magnitude}");
        assert_eq!(result.hits()[0].score, 1.0, "magnitude {magnitude}");
    }
}

#[test]
fn insert_with_wrong_dimension_fails() {
    let store = InMemoryVectorStore::new();
    store.insert(entry("a", 0, vec![0.5; 8])).expect("insert");
    let err = store.insert(entry("a", 1, vec![0.5; 5])).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 8, actual: 5 }));
    assert_eq!(store.size(), 1, "rejected entry is not stored");
}

#[test]
fn query_with_wrong_dimension_fails_on_non_empty_store() {
    let store = seeded(3, 8);
    assert!(matches!(store.query(&[1.0; 5], 3, 0.0), Err(Error::DimensionMismatch { expected: 8, actual: 5 })));
}

#[test]
fn zero_length_embedding_rejected() {
    let store = InMemoryVectorStore::new();
    assert!(matches!(store.insert(entry("a", 0, Vec::new())), Err(Error::EmptyEmbedding)));
}

#[test]
fn pinned_dimension_applies_before_first_insert_and_after_clear() {
    let store = InMemoryVectorStore::with_dimension(4);
    assert!(store.insert(entry("a", 0, vec![1.0; 3])).is_err());
    store.insert(entry("a", 0, vec![1.0; 4])).expect("insert");
    store.clear();
    assert_eq!(store.dim(), Some(4));
    assert!(store.insert(entry("a", 0, vec![1.0; 3])).is_err());
}

#[test]
fn clear_resets_unpinned_dimension() {
    let store = seeded(2, 8);
    store.clear();
    assert_eq!(store.dim(), None);
    store.insert(entry("b", 0, vec![1.0; 5])).expect("new dimensionality after clear");
}

#[test]
fn results_sorted_and_sized_min_k_n() {
    let store = seeded(20, 6);
    let q = [0.3, -0.1, 0.8, 0.0, -0.5, 0.2];
    for k in [1usize, 5, 20, 50] {
        let result = store.query(&q, k, 0.0).expect("query");
        assert_eq!(result.len(), k.min(store.size()));
        assert!(result.hits().windows(2).all(|w| w[0].score >= w[1].score));
    }
}

#[test]
fn min_score_is_a_floor() {
    let store = seeded(30, 6);
    let q = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    for floor in [0.0f32, 0.4, 0.5, 0.6, 0.9] {
        let result = store.query(&q, 30, floor).expect("query");
        assert!(result.iter().all(|h| h.score >= floor && h.score <= 1.0));
    }
}

#[test]
fn round_trip_returns_every_entry_once() {
    let n = 17;
    let store = seeded(n, 5);
    let result = store.query(&[0.1, 0.2, 0.3, 0.4, 0.5], n, 0.0).expect("query");
    let mut positions: Vec<usize> = result.iter().map(|h| h.segment.position).collect();
    positions.sort_unstable();
    assert_eq!(positions, (0..n).collect::<Vec<_>>());
}

#[test]
fn ties_break_by_insertion_order() {
    let store = InMemoryVectorStore::new();
    for i in 0..4 { store.insert(entry("dup", i, vec![1.0, 1.0])).expect("insert"); }
    store.insert(entry("best", 0, vec![1.0, 0.0])).expect("insert");
    let result = store.query(&[1.0, 0.0], 3, 0.0).expect("query");
    let ids: Vec<&str> = result.iter().map(|h| h.segment.id.as_str()).collect();
    assert_eq!(ids, vec!["best:0", "dup:0", "dup:1"]);
}

#[test]
fn top_k_zero_is_empty() {
    let store = seeded(3, 4);
    assert!(store.query(&[1.0; 4], 0, 0.0).expect("query").is_empty());
}

#[test]
fn clear_is_idempotent_and_empties_queries() {
    let store = seeded(5, 4);
    store.clear();
    store.clear();
    assert_eq!(store.size(), 0);
    assert!(store.query(&[1.0; 4], 3, 0.0).expect("query").is_empty());
}

#[test]
fn concurrent_inserts_and_queries_see_whole_entries() {
    let store = Arc::new(InMemoryVectorStore::with_dimension(16));
    let embedder = HashEmbedder::new(16).expect("embedder");
    std::thread::scope(|s| {
        for t in 0..4 {
            let store = Arc::clone(&store);
            let embedder = embedder.clone();
            s.spawn(move || {
                for i in 0..50 {
                    let text = format!("writer {t} item {i}");
                    let v = embedder.embed(&text).expect("embed");
                    store.insert(IndexEntry { embedding: v, segment: Segment::new(&format!("w{t}"), i, text) }).expect("insert");
                }
            });
        }
        for _ in 0..2 {
            let store = Arc::clone(&store);
            let embedder = embedder.clone();
            s.spawn(move || {
                let q = embedder.embed("writer item").expect("embed");
                for _ in 0..50 {
                    let result = store.query(&q, 10, 0.0).expect("query");
                    for hit in &result {
                        assert_eq!(hit.segment.id, format!("{}:{}", hit.segment.source_id, hit.segment.position));
                        assert!(hit.segment.text.starts_with("writer"));
                    }
                }
            });
        }
    });
    assert_eq!(store.size(), 200);
}

#[test]
fn clear_racing_inserts_and_queries_keeps_entries_whole() {
    const WRITERS: usize = 3;
    const AFTER_CLEAR: usize = 20;
    let store = InMemoryVectorStore::with_dimension(8);
    let embedder = HashEmbedder::new(8).expect("embedder");
    let settled = Barrier::new(WRITERS + 1);
    let cleared = Barrier::new(WRITERS + 1);
    std::thread::scope(|s| {
        for t in 0..WRITERS {
            let (store, embedder, settled, cleared) = (&store, &embedder, &settled, &cleared);
            s.spawn(move || {
                let insert = |i: usize| {
                    let text = format!("writer {t} item {i}");
                    let v = embedder.embed(&text).expect("embed");
                    store.insert(IndexEntry { embedding: v, segment: Segment::new(&format!("w{t}"), i, text) }).expect("insert");
                };
                for i in 0..100 { insert(i); }
                settled.wait();
                cleared.wait();
                for i in 100..100 + AFTER_CLEAR { insert(i); }
            });
        }
        for _ in 0..2 {
            let (store, embedder) = (&store, &embedder);
            s.spawn(move || {
                let q = embedder.embed("writer item").expect("embed");
                for _ in 0..100 {
                    let result = store.query(&q, 5, 0.0).expect("query");
                    assert!(result.len() <= 5);
                    for hit in &result {
                        assert_eq!(hit.segment.id, format!("{}:{}", hit.segment.source_id, hit.segment.position));
                        assert_eq!(hit.segment.text, format!("writer {} item {}", &hit.segment.source_id[1..], hit.segment.position));
                    }
                }
            });
        }
        let (store, settled, cleared) = (&store, &settled, &cleared);
        s.spawn(move || {
            for _ in 0..20 { store.clear(); }
            settled.wait();
            store.clear();
            cleared.wait();
        });
    });
    assert_eq!(store.size(), WRITERS * AFTER_CLEAR);
    assert_eq!(store.dim(), Some(8));
    let all = store.query(&[1.0; 8], store.size(), 0.0).expect("query");
    assert_eq!(all.len(), WRITERS * AFTER_CLEAR);
    assert!(all.iter().all(|hit| hit.segment.position >= 100));
}
