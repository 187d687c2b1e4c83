use cbie_core::errors::ScoringError;

/// Raw and normalized cluster strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthScore {
    /// `ln(n+1) · m · ρ`.
    pub raw: f64,
    /// `raw / (1 + raw)`, in [0, 1).
    pub normalized: f64,
}

/// Cluster strength from size, mean adjusted weight, and recency.
///
/// The log size term gives diminishing returns for large clusters.
pub fn cluster_strength(
    size: usize,
    mean_adjusted_weight: f64,
    recency: f64,
) -> Result<StrengthScore, ScoringError> {
    if size == 0 {
        return Err(ScoringError::empty("cluster members"));
    }
    let raw = ((size + 1) as f64).ln() * mean_adjusted_weight * recency;
    let raw = raw.max(0.0);
    Ok(StrengthScore {
        raw,
        normalized: raw / (1.0 + raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cluster_is_rejected() {
        assert!(matches!(
            cluster_strength(0, 0.9, 1.0),
            Err(ScoringError::EmptyInput { .. })
        ));
    }

    #[test]
    fn zero_recency_gives_zero_strength() {
        let s = cluster_strength(10, 0.9, 0.0).unwrap();
        assert_eq!(s.raw, 0.0);
        assert_eq!(s.normalized, 0.0);
    }

    #[test]
    fn normalization_stays_below_one() {
        let s = cluster_strength(10_000, 1.01, 1.0).unwrap();
        assert!(s.normalized < 1.0);
        assert!((s.normalized - s.raw / (1.0 + s.raw)).abs() < 1e-12);
    }
}
