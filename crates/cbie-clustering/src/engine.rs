use cbie_core::config::ClusteringConfig;
use cbie_core::constants::cluster_id;
use cbie_core::errors::{CbieResult, ClusteringError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::density;
use crate::similarity::{euclidean_distance, l2_normalize, mean_vector};

/// One cluster found in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterGroup {
    /// Run-local handle derived from ordering.
    pub cluster_id: String,
    /// Indices into the input slice, ascending.
    pub member_indices: Vec<usize>,
    pub member_ids: Vec<String>,
    /// Mean of the members' raw embeddings.
    pub centroid: Vec<f32>,
    /// Each normalized member's distance to the mean normalized member,
    /// parallel to `member_ids`.
    pub distances: Vec<f64>,
}

impl ClusterGroup {
    pub fn size(&self) -> usize {
        self.member_ids.len()
    }
}

/// Partition of one user's embeddings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusteringOutput {
    /// Largest first; ties broken by first member index.
    pub clusters: Vec<ClusterGroup>,
    /// Unassigned ids. Never wrapped into clusters.
    pub noise_ids: Vec<String>,
}

impl ClusteringOutput {
    pub fn clustered_count(&self) -> usize {
        self.clusters.iter().map(ClusterGroup::size).sum()
    }

    pub fn total_points(&self) -> usize {
        self.clustered_count() + self.noise_ids.len()
    }
}

/// Density clustering engine over a fixed parameter set.
#[derive(Debug, Clone)]
pub struct ClusteringEngine {
    config: ClusteringConfig,
}

impl ClusteringEngine {
    pub fn new(config: ClusteringConfig) -> CbieResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Cluster `(id, embedding)` pairs.
    ///
    /// Deterministic for fixed input and parameters. Fewer points than
    /// `min_cluster_size` are all noise without running the clusterer.
    pub fn cluster(&self, points: &[(&str, &[f32])]) -> CbieResult<ClusteringOutput> {
        validate(points)?;

        if points.len() < self.config.min_cluster_size {
            info!(
                points = points.len(),
                min_cluster_size = self.config.min_cluster_size,
                "too few points to cluster"
            );
            return Ok(ClusteringOutput {
                clusters: vec![],
                noise_ids: points.iter().map(|(id, _)| id.to_string()).collect(),
            });
        }

        let normalized: Vec<Vec<f32>> = points.par_iter().map(|(_, e)| l2_normalize(e)).collect();

        let mut groups = density::density_groups(
            &normalized,
            self.config.min_cluster_size,
            self.config.min_samples,
            self.config.cluster_selection_epsilon,
        );
        groups.retain(|g| g.len() >= self.config.min_cluster_size);
        for g in &mut groups {
            g.sort_unstable();
        }
        groups.sort_by(|a, b| b.len().cmp(&a.len()).then(a[0].cmp(&b[0])));

        let mut assigned = vec![false; points.len()];
        let clusters: Vec<ClusterGroup> = groups
            .iter()
            .enumerate()
            .map(|(index, members)| {
                for &m in members {
                    assigned[m] = true;
                }
                build_group(index, members, points, &normalized)
            })
            .collect();

        let noise_ids: Vec<String> = points
            .iter()
            .enumerate()
            .filter(|(i, _)| !assigned[*i])
            .map(|(_, (id, _))| id.to_string())
            .collect();

        info!(
            points = points.len(),
            clusters = clusters.len(),
            noise = noise_ids.len(),
            "clustering complete"
        );

        Ok(ClusteringOutput {
            clusters,
            noise_ids,
        })
    }
}

impl Default for ClusteringEngine {
    fn default() -> Self {
        Self {
            config: ClusteringConfig::default(),
        }
    }
}

fn build_group(
    index: usize,
    members: &[usize],
    points: &[(&str, &[f32])],
    normalized: &[Vec<f32>],
) -> ClusterGroup {
    let centroid = mean_vector(members.iter().map(|&m| points[m].1));
    let representative = mean_vector(members.iter().map(|&m| normalized[m].as_slice()));
    let distances = members
        .iter()
        .map(|&m| euclidean_distance(&normalized[m], &representative))
        .collect();

    ClusterGroup {
        cluster_id: cluster_id(index),
        member_indices: members.to_vec(),
        member_ids: members.iter().map(|&m| points[m].0.to_string()).collect(),
        centroid,
        distances,
    }
}

fn validate(points: &[(&str, &[f32])]) -> Result<(), ClusteringError> {
    let Some((_, first)) = points.first() else {
        return Ok(());
    };
    let expected = first.len();
    for (id, embedding) in points {
        if embedding.is_empty() {
            return Err(ClusteringError::EmptyEmbedding { id: id.to_string() });
        }
        if embedding.len() != expected {
            return Err(ClusteringError::DimensionMismatch {
                id: id.to_string(),
                expected,
                actual: embedding.len(),
            });
        }
        if let Some(position) = embedding.iter().position(|v| !v.is_finite()) {
            return Err(ClusteringError::NonFiniteValue {
                id: id.to_string(),
                position,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbie_core::CbieError;

    fn owned(points: &[(&str, Vec<f32>)]) -> Vec<(String, Vec<f32>)> {
        points.iter().map(|(id, v)| (id.to_string(), v.clone())).collect()
    }

    fn as_refs(points: &[(String, Vec<f32>)]) -> Vec<(&str, &[f32])> {
        points.iter().map(|(id, v)| (id.as_str(), v.as_slice())).collect()
    }

    #[test]
    fn single_point_is_noise() {
        let pts = owned(&[("a", vec![1.0, 0.0])]);
        let out = ClusteringEngine::default().cluster(&as_refs(&pts)).unwrap();
        assert!(out.clusters.is_empty());
        assert_eq!(out.noise_ids, vec!["a".to_string()]);
    }

    #[test]
    fn empty_input_is_empty_output() {
        let out = ClusteringEngine::default().cluster(&[]).unwrap();
        assert_eq!(out, ClusteringOutput::default());
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let pts = owned(&[("a", vec![1.0, 0.0]), ("b", vec![1.0])]);
        let err = ClusteringEngine::default().cluster(&as_refs(&pts)).unwrap_err();
        assert!(matches!(
            err,
            CbieError::ClusteringError(ClusteringError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn non_finite_value_is_rejected() {
        let pts = owned(&[("a", vec![1.0, 0.0]), ("b", vec![f32::NAN, 1.0])]);
        let err = ClusteringEngine::default().cluster(&as_refs(&pts)).unwrap_err();
        assert!(matches!(
            err,
            CbieError::ClusteringError(ClusteringError::NonFiniteValue { position: 0, .. })
        ));
    }

    #[test]
    fn empty_embedding_is_rejected() {
        let pts = owned(&[("a", vec![]), ("b", vec![])]);
        assert!(ClusteringEngine::default().cluster(&as_refs(&pts)).is_err());
    }

    #[test]
    fn centroid_is_mean_of_raw_embeddings() {
        let pts = owned(&[("a", vec![2.0, 0.0]), ("b", vec![4.0, 0.02])]);
        let out = ClusteringEngine::default().cluster(&as_refs(&pts)).unwrap();
        assert_eq!(out.clusters.len(), 1);
        let c = &out.clusters[0];
        assert!((c.centroid[0] - 3.0).abs() < 1e-6);
        assert!((c.centroid[1] - 0.01).abs() < 1e-6);
        assert_eq!(c.distances.len(), 2);
        assert_eq!(c.cluster_id, "cluster_0");
    }
}
