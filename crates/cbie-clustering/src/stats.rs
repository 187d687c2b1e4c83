//! Clustering run statistics and quality assessment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::ClusteringOutput;

/// Noise ratio above which a run is flagged.
pub const MAX_NOISE_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusteringStats {
    pub cluster_count: usize,
    pub clustered_count: usize,
    pub noise_count: usize,
    pub mean_size: f64,
    pub min_size: usize,
    pub max_size: usize,
    /// Cluster size -> number of clusters of that size.
    pub size_distribution: BTreeMap<usize, usize>,
}

impl ClusteringStats {
    pub fn from_output(output: &ClusteringOutput) -> Self {
        let sizes: Vec<usize> = output.clusters.iter().map(|c| c.size()).collect();
        let mut size_distribution = BTreeMap::new();
        for &s in &sizes {
            *size_distribution.entry(s).or_insert(0) += 1;
        }
        let clustered_count: usize = sizes.iter().sum();

        Self {
            cluster_count: sizes.len(),
            clustered_count,
            noise_count: output.noise_ids.len(),
            mean_size: if sizes.is_empty() {
                0.0
            } else {
                clustered_count as f64 / sizes.len() as f64
            },
            min_size: sizes.iter().copied().min().unwrap_or(0),
            max_size: sizes.iter().copied().max().unwrap_or(0),
            size_distribution,
        }
    }

    /// Share of input points left unclustered. 0 for an empty run.
    pub fn noise_ratio(&self) -> f64 {
        let total = self.clustered_count + self.noise_count;
        if total == 0 {
            0.0
        } else {
            self.noise_count as f64 / total as f64
        }
    }
}

/// Quality assessment of a clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityAssessment {
    pub enough_clusters: bool,
    pub noise_ok: bool,
    pub noise_ratio: f64,
    /// Fails only on too few clusters; high noise is a warning.
    pub overall_pass: bool,
    pub issues: Vec<String>,
}

pub fn assess_quality(stats: &ClusteringStats, min_clusters: usize) -> QualityAssessment {
    let mut issues = Vec::new();

    let enough_clusters = stats.cluster_count >= min_clusters;
    if !enough_clusters {
        issues.push(format!(
            "{} clusters formed, fewer than required {}",
            stats.cluster_count, min_clusters
        ));
    }

    let noise_ratio = stats.noise_ratio();
    let noise_ok = noise_ratio <= MAX_NOISE_RATIO;
    if !noise_ok {
        warn!(noise_ratio, noise = stats.noise_count, "high noise ratio");
        issues.push(format!(
            "noise ratio {noise_ratio:.2} above {MAX_NOISE_RATIO:.2}"
        ));
    }

    QualityAssessment {
        enough_clusters,
        noise_ok,
        noise_ratio,
        overall_pass: enough_clusters,
        issues,
    }
}
