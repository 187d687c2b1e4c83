//! Brute-force ranking shared by both vector stores.

use cbie_core::models::VectorRecord;

/// Cosine similarity in f64. Zero-norm or mismatched vectors score 0.
pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    let denom = na.sqrt() * nb.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

/// Score every candidate against `query`, best first, ties broken by id.
pub fn rank(query: &[f32], candidates: Vec<VectorRecord>, limit: usize) -> Vec<(VectorRecord, f64)> {
    let mut scored: Vec<(VectorRecord, f64)> = candidates
        .into_iter()
        .map(|r| {
            let score = cosine(query, &r.vector);
            (r, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        assert!((cosine(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-9);
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn rank_orders_and_truncates() {
        let recs = vec![
            VectorRecord::new("far", vec![0.0, 1.0], Map::new()),
            VectorRecord::new("near", vec![1.0, 0.1], Map::new()),
            VectorRecord::new("exact", vec![1.0, 0.0], Map::new()),
        ];
        let ranked = rank(&[1.0, 0.0], recs, 2);
        let ids: Vec<&str> = ranked.iter().map(|(r, _)| r.id.as_str()).collect();
        assert_eq!(ids, vec!["exact", "near"]);
    }
}
