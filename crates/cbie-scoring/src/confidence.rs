use cbie_core::errors::ScoringError;

/// Cluster confidence and the factors behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceScore {
    /// Final confidence in [0, 1].
    pub confidence: f64,
    pub consistency: f64,
    pub reinforcement: f64,
    pub clarity_trend: f64,
    pub mean_intra_distance: f64,
}

/// `1 / (1 + mean_intra_cluster_distance)`.
pub fn consistency(mean_intra_distance: f64) -> f64 {
    1.0 / (1.0 + mean_intra_distance.max(0.0))
}

/// `min(1, log10(n+1))`.
pub fn reinforcement(size: usize) -> f64 {
    ((size + 1) as f64).log10().min(1.0)
}

/// Second-half mean clarity minus first-half mean clarity, ordered by time.
///
/// Fewer than two points have no trend.
pub fn clarity_trend(points: &[(i64, f64)]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|&(t, _)| t);

    let mid = sorted.len() / 2;
    let half_mean = |half: &[(i64, f64)]| half.iter().map(|&(_, c)| c).sum::<f64>() / half.len() as f64;
    half_mean(&sorted[mid..]) - half_mean(&sorted[..mid])
}

/// Multiplicative confidence: consistency × reinforcement, boosted by an
/// improving clarity trend, clamped to [0, 1].
pub fn cluster_confidence(
    intra_distances: &[f64],
    size: usize,
    clarity_points: &[(i64, f64)],
    trend_boost: f64,
) -> Result<ConfidenceScore, ScoringError> {
    if intra_distances.is_empty() || size == 0 {
        return Err(ScoringError::empty("intra-cluster distances"));
    }
    let mean_intra_distance = intra_distances.iter().sum::<f64>() / intra_distances.len() as f64;
    let consistency = consistency(mean_intra_distance);
    let reinforcement = reinforcement(size);
    let trend = if size > 1 { clarity_trend(clarity_points) } else { 0.0 };

    let mut confidence = consistency * reinforcement;
    if trend > 0.0 {
        confidence *= 1.0 + trend_boost * trend;
    }

    Ok(ConfidenceScore {
        confidence: confidence.clamp(0.0, 1.0),
        consistency,
        reinforcement,
        clarity_trend: trend,
        mean_intra_distance,
    })
}
