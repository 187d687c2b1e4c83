//! Six-phase analysis pipeline.
//!
//! Phase 1: Weights → Phase 2: Embeddings → Phase 3: Clustering →
//! Phase 4: Assembly → Phase 5: Labeling → Phase 6: Profile

pub mod phase1_weights;
pub mod phase2_embeddings;
pub mod phase3_clustering;
pub mod phase4_assembly;
pub mod phase5_labeling;
pub mod phase6_profile;

use chrono::Utc;

use cbie_clustering::{ClusteringEngine, ClusteringStats};
use cbie_core::errors::CbieResult;
use cbie_core::models::{BehaviorProfile, Observation, Prompt};
use cbie_core::traits::IEmbeddingProvider;
use cbie_labeling::LabelSelector;
use cbie_observability::tracing_setup::events;
use cbie_scoring::ScoringEngine;
use tracing::{debug, info};

/// Collaborators and engines for one run.
pub struct PipelineContext<'a> {
    pub scoring: &'a ScoringEngine,
    pub clustering: &'a ClusteringEngine,
    pub embedder: &'a dyn IEmbeddingProvider,
    pub selector: &'a LabelSelector,
    pub embedding_batch_size: usize,
}

/// Everything a run produces.
pub struct PipelineOutput {
    pub profile: BehaviorProfile,
    /// Indices of observations whose embedding was computed in this run.
    pub embedded: Vec<usize>,
    pub clustering_stats: ClusteringStats,
}

/// Run the full pipeline over one user's observations.
///
/// Missing embeddings are written into `observations` in place.
pub fn run_pipeline(
    ctx: &PipelineContext<'_>,
    user_id: &str,
    observations: &mut [Observation],
    prompts: &[Prompt],
    reference_time: i64,
    generate_archetype: bool,
) -> CbieResult<PipelineOutput> {
    let now = Utc::now();

    // Phase 1: Weights.
    let adjusted = phase1_weights::adjusted_weights(ctx.scoring, observations)?;
    info!(count = adjusted.len(), "Phase 1: observation weights computed");

    // Phase 2: Embeddings.
    let embedded = phase2_embeddings::fill_missing_embeddings(
        observations,
        ctx.embedder,
        ctx.embedding_batch_size,
    )?;
    info!(embedded = embedded.len(), "Phase 2: embeddings ready");

    // Phase 3: Clustering.
    let output = phase3_clustering::cluster_observations(ctx.clustering, observations)?;
    let clustering_stats = ClusteringStats::from_output(&output);
    let quality = cbie_clustering::assess_quality(&clustering_stats, 1);
    for issue in &quality.issues {
        debug!(issue = %issue, "clustering quality");
    }
    if !quality.noise_ok {
        events::clustering_degraded(user_id, quality.noise_ratio, output.clusters.len());
    }
    info!(
        clusters = output.clusters.len(),
        noise = output.noise_ids.len(),
        "Phase 3: clustering complete"
    );

    // Phase 4: Assembly, scoring, tiers.
    let mut clusters = output
        .clusters
        .iter()
        .map(|group| {
            phase4_assembly::assemble_cluster(
                ctx.scoring,
                group,
                observations,
                &adjusted,
                reference_time,
                now,
            )
        })
        .collect::<CbieResult<Vec<_>>>()?;
    info!(clusters = clusters.len(), "Phase 4: clusters scored");

    // Phase 5: Labels and names.
    phase5_labeling::label_clusters(ctx.selector, &mut clusters);
    let archetype = if generate_archetype {
        phase5_labeling::archetype_for(ctx.selector, &clusters)
    } else {
        None
    };
    info!(clusters = clusters.len(), archetype = ?archetype, "Phase 5: labeling complete");

    // Phase 6: Profile.
    let statistics = phase6_profile::statistics(observations.len(), &output, prompts);
    let profile = phase6_profile::assemble_profile(user_id, clusters, archetype, statistics, now);
    info!(
        clusters = profile.clusters.len(),
        prompts = profile.statistics.total_prompts,
        "Phase 6: profile assembled"
    );

    Ok(PipelineOutput {
        profile,
        embedded,
        clustering_stats,
    })
}
