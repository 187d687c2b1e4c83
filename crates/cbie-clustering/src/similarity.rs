//! Vector math shared by clustering, reconciliation, and vector search.

/// Added to the norm before dividing, so zero vectors stay finite.
pub const NORM_EPSILON: f32 = 1e-10;

/// Cosine similarity between two vectors.
/// Returns 0.0 for zero-length, mismatched, or zero-magnitude vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Scale to unit length.
pub fn l2_normalize(v: &[f32]) -> Vec<f32> {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt() + NORM_EPSILON;
    v.iter().map(|x| x / norm).collect()
}

pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = (*x - *y) as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Component-wise mean. Empty input yields an empty vector.
pub fn mean_vector<'a, I>(vectors: I) -> Vec<f32>
where
    I: IntoIterator<Item = &'a [f32]>,
{
    let mut sum: Vec<f64> = Vec::new();
    let mut count = 0usize;
    for v in vectors {
        if sum.is_empty() {
            sum = vec![0.0; v.len()];
        }
        for (s, x) in sum.iter_mut().zip(v) {
            *s += *x as f64;
        }
        count += 1;
    }
    if count == 0 {
        return Vec::new();
    }
    sum.into_iter().map(|s| (s / count as f64) as f32).collect()
}
