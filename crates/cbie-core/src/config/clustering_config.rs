use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{CbieError, CbieResult};

/// Density clustering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Minimum members for a group to count as a cluster.
    pub min_cluster_size: usize,
    /// Neighbourhood size for a point to count as a core point.
    pub min_samples: usize,
    /// Distance below which nearby micro-clusters merge.
    pub cluster_selection_epsilon: f64,
    /// Minimum centroid cosine similarity for cross-run cluster matching.
    pub reconcile_min_similarity: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            min_cluster_size: defaults::DEFAULT_MIN_CLUSTER_SIZE,
            min_samples: defaults::DEFAULT_MIN_SAMPLES,
            cluster_selection_epsilon: defaults::DEFAULT_CLUSTER_SELECTION_EPSILON,
            reconcile_min_similarity: defaults::DEFAULT_RECONCILE_MIN_SIMILARITY,
        }
    }
}

impl ClusteringConfig {
    pub fn validate(&self) -> CbieResult<()> {
        if self.min_cluster_size < 2 {
            return Err(CbieError::config(format!(
                "clustering.min_cluster_size must be >= 2, got {}",
                self.min_cluster_size
            )));
        }
        if self.min_samples < 1 {
            return Err(CbieError::config("clustering.min_samples must be >= 1"));
        }
        if !self.cluster_selection_epsilon.is_finite() || self.cluster_selection_epsilon < 0.0 {
            return Err(CbieError::config(format!(
                "clustering.cluster_selection_epsilon must be >= 0, got {}",
                self.cluster_selection_epsilon
            )));
        }
        if !(-1.0..=1.0).contains(&self.reconcile_min_similarity) {
            return Err(CbieError::config(format!(
                "clustering.reconcile_min_similarity must be in [-1, 1], got {}",
                self.reconcile_min_similarity
            )));
        }
        Ok(())
    }
}
