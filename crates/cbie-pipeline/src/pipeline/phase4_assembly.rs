//! Phase 4: aggregate members, score, and tier one cluster.

use chrono::{DateTime, Utc};

use cbie_clustering::ClusterGroup;
use cbie_core::constants::SECONDS_PER_DAY;
use cbie_core::errors::CbieResult;
use cbie_core::models::{BehaviorCluster, Observation};
use cbie_scoring::ScoringEngine;
use tracing::debug;

/// Build a scored, tiered cluster from its members. Label and name are left
/// empty for Phase 5.
pub fn assemble_cluster(
    scoring: &ScoringEngine,
    group: &ClusterGroup,
    observations: &[Observation],
    adjusted_weights: &[f64],
    reference_time: i64,
    now: DateTime<Utc>,
) -> CbieResult<BehaviorCluster> {
    let members: Vec<&Observation> = group
        .member_indices
        .iter()
        .map(|&i| &observations[i])
        .collect();
    let weights: Vec<f64> = group
        .member_indices
        .iter()
        .map(|&i| adjusted_weights[i])
        .collect();

    let scores = scoring.score_cluster(&members, &weights, &group.distances, reference_time)?;
    let tier = scoring.assign_tier(scores.strength.raw);

    let timestamps: Vec<i64> = members.iter().map(|o| o.timestamp).collect();
    let first_seen = timestamps.iter().copied().min().unwrap_or(reference_time);
    let last_seen = timestamps.iter().copied().max().unwrap_or(reference_time);

    debug!(
        cluster_id = %group.cluster_id,
        size = members.len(),
        raw_strength = scores.strength.raw,
        tier = %tier,
        "cluster assembled"
    );

    Ok(BehaviorCluster {
        cluster_id: group.cluster_id.clone(),
        observation_ids: group.member_ids.clone(),
        cluster_size: members.len(),
        centroid: group.centroid.clone(),
        prompt_ids: members.iter().map(|o| o.prompt_id.clone()).collect(),
        timestamps,
        wordings: members.iter().map(|o| o.text.clone()).collect(),
        first_seen,
        last_seen,
        days_active: (last_seen - first_seen) as f64 / SECONDS_PER_DAY,
        strength: scores.strength.normalized,
        confidence: scores.confidence.confidence,
        breakdown: scores.breakdown(),
        label: String::new(),
        name: String::new(),
        tier,
        created_at: now,
        updated_at: now,
    })
}
