//! Phase 3: density clustering over the observation embeddings.

use cbie_clustering::{ClusteringEngine, ClusteringOutput};
use cbie_core::errors::CbieResult;
use cbie_core::models::Observation;

pub fn cluster_observations(
    engine: &ClusteringEngine,
    observations: &[Observation],
) -> CbieResult<ClusteringOutput> {
    let span = cbie_observability::clustering_span!(observations.len());
    let _guard = span.enter();

    // A missing embedding reaches the engine as empty and is rejected there.
    let points: Vec<(&str, &[f32])> = observations
        .iter()
        .map(|o| (o.observation_id.as_str(), o.embedding.as_deref().unwrap_or(&[])))
        .collect();
    engine.cluster(&points)
}
