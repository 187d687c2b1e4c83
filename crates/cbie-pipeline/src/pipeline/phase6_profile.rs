//! Phase 6: run statistics, cluster ordering, profile assembly.

use chrono::{DateTime, Utc};

use cbie_clustering::ClusteringOutput;
use cbie_core::constants::SECONDS_PER_DAY;
use cbie_core::models::{BehaviorCluster, BehaviorProfile, ProfileStatistics, Prompt};

pub fn statistics(total_observations: usize, output: &ClusteringOutput, prompts: &[Prompt]) -> ProfileStatistics {
    let first = prompts.iter().map(|p| p.timestamp).min();
    let last = prompts.iter().map(|p| p.timestamp).max();
    let time_span_days = match (first, last) {
        (Some(first), Some(last)) => (last - first) as f64 / SECONDS_PER_DAY,
        _ => 0.0,
    };

    ProfileStatistics {
        total_observations,
        clusters_formed: output.clusters.len(),
        clustered_observations: output.clustered_count(),
        noise_observations: output.noise_ids.len(),
        total_prompts: prompts.len(),
        time_span_days,
    }
}

/// Strongest first by raw strength, then by confidence; stable otherwise.
pub fn rank_clusters(clusters: &mut [BehaviorCluster]) {
    clusters.sort_by(|a, b| {
        b.raw_strength()
            .total_cmp(&a.raw_strength())
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });
}

pub fn assemble_profile(
    user_id: &str,
    mut clusters: Vec<BehaviorCluster>,
    archetype: Option<String>,
    statistics: ProfileStatistics,
    generated_at: DateTime<Utc>,
) -> BehaviorProfile {
    rank_clusters(&mut clusters);
    BehaviorProfile {
        user_id: user_id.to_string(),
        generated_at,
        clusters,
        archetype,
        statistics,
    }
}
