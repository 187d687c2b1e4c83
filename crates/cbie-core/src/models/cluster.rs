use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tier::Tier;

/// Intermediate values behind a cluster's strength and confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// `ln(n+1) · m · ρ`, the value tiers are compared against.
    pub raw_strength: f64,
    pub mean_adjusted_weight: f64,
    pub recency_factor: f64,
    pub mean_intra_distance: f64,
    pub consistency: f64,
    pub reinforcement: f64,
    pub clarity_trend: f64,
}

/// A density-connected group of observations; the primary scored entity.
///
/// Scores are computed from aggregate statistics over every member, never
/// from the label or a single representative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorCluster {
    /// Run-local handle. Carries no meaning across runs.
    pub cluster_id: String,
    /// Every member, in input order.
    pub observation_ids: Vec<String>,
    pub cluster_size: usize,
    /// Mean of the members' raw embeddings.
    pub centroid: Vec<f32>,
    /// One entry per member, duplicates preserved.
    pub prompt_ids: Vec<String>,
    /// One entry per member.
    pub timestamps: Vec<i64>,
    /// Member texts, duplicates preserved.
    pub wordings: Vec<String>,
    pub first_seen: i64,
    pub last_seen: i64,
    /// `(last_seen - first_seen)` in days.
    pub days_active: f64,
    /// Normalized strength in [0, 1).
    pub strength: f64,
    /// Confidence in [0, 1].
    pub confidence: f64,
    pub breakdown: ScoreBreakdown,
    pub label: String,
    pub name: String,
    pub tier: Tier,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BehaviorCluster {
    /// Member texts with duplicates removed, first occurrence order.
    pub fn distinct_wordings(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.wordings
            .iter()
            .map(String::as_str)
            .filter(|w| seen.insert(*w))
            .collect()
    }

    pub fn raw_strength(&self) -> f64 {
        self.breakdown.raw_strength
    }
}
