//! ClusterAnalysisPipeline: the two analysis entry points and persistence.

use std::sync::Arc;

use chrono::Utc;

use cbie_clustering::{reconcile, ClusteringEngine};
use cbie_core::config::CbieConfig;
use cbie_core::errors::{CbieError, CbieResult};
use cbie_core::models::{BehaviorProfile, MetadataFilter, Observation, Prompt, VectorRecord};
use cbie_core::traits::{IDocumentStore, IEmbeddingProvider, ITextGenerator, IVectorStore};
use cbie_labeling::LabelSelector;
use cbie_observability::tracing_setup::events;
use cbie_scoring::ScoringEngine;
use tracing::{info, warn};

use crate::options::AnalysisOptions;
use crate::pipeline::{self, PipelineContext, PipelineOutput};

/// Behavior-profile analysis over injected collaborators.
///
/// Holds only immutable configuration and collaborator handles; every run
/// recomputes the profile from the full observation set. Two concurrent runs
/// for the same user both write their profile and the last write wins.
pub struct ClusterAnalysisPipeline {
    config: CbieConfig,
    scoring: ScoringEngine,
    clustering: ClusteringEngine,
    embedder: Arc<dyn IEmbeddingProvider>,
    vectors: Arc<dyn IVectorStore>,
    pub(crate) documents: Arc<dyn IDocumentStore>,
    pub(crate) selector: LabelSelector,
}

impl ClusterAnalysisPipeline {
    pub fn new(
        config: CbieConfig,
        embedder: Arc<dyn IEmbeddingProvider>,
        vectors: Arc<dyn IVectorStore>,
        documents: Arc<dyn IDocumentStore>,
        generator: Arc<dyn ITextGenerator>,
    ) -> CbieResult<Self> {
        config.validate()?;
        let scoring = ScoringEngine::new(config.scoring.clone())?;
        let clustering = ClusteringEngine::new(config.clustering.clone())?;
        let selector = LabelSelector::new(generator, config.labeling.clone());
        Ok(Self {
            config,
            scoring,
            clustering,
            embedder,
            vectors,
            documents,
            selector,
        })
    }

    /// Build the embedder and generator from config; stores are injected.
    pub fn from_config(
        config: CbieConfig,
        vectors: Arc<dyn IVectorStore>,
        documents: Arc<dyn IDocumentStore>,
    ) -> CbieResult<Self> {
        let embedder: Arc<dyn IEmbeddingProvider> =
            Arc::from(cbie_embeddings::create_provider(&config.embedding)?);
        let generator = cbie_labeling::create_generator(&config.generation)?;
        Self::new(config, embedder, vectors, documents, generator)
    }

    pub fn config(&self) -> &CbieConfig {
        &self.config
    }

    pub fn label_selector(&self) -> &LabelSelector {
        &self.selector
    }

    /// Analyze everything stored for `user_id`.
    ///
    /// Fails with `ObservationsNotFound` when the vector store holds nothing
    /// for the user. Observations that had to be embedded are written back.
    pub fn analyze_from_storage(
        &self,
        user_id: &str,
        options: &AnalysisOptions,
    ) -> CbieResult<BehaviorProfile> {
        let reference_time = options
            .reference_time
            .unwrap_or_else(|| Utc::now().timestamp());

        let records = self.vectors.query_by_metadata(&MetadataFilter::for_user(user_id))?;
        if records.is_empty() {
            return Err(CbieError::ObservationsNotFound {
                user_id: user_id.to_string(),
            });
        }
        let mut observations: Vec<Observation> = records
            .iter()
            .map(|r| {
                Observation::from_vector_record(r, reference_time, self.config.scoring.default_decay_rate)
            })
            .collect();
        let prompts = self.documents.prompts_for_user(user_id)?;
        info!(
            user_id,
            observations = observations.len(),
            prompts = prompts.len(),
            "loaded observations from storage"
        );

        let output = self.run(user_id, &mut observations, &prompts, reference_time, options)?;

        if options.persist {
            let refreshed: Vec<&Observation> = output.embedded.iter().map(|&i| &observations[i]).collect();
            let written = self.store_observations(user_id, &refreshed)?;
            self.store_profile(&output.profile, written)?;
        }
        Ok(output.profile)
    }

    /// Analyze explicitly supplied observations and prompts.
    ///
    /// With `persist`, the observations (with their embeddings), the prompts,
    /// and the profile are written to the stores after the run succeeds.
    pub fn analyze_observations(
        &self,
        user_id: &str,
        mut observations: Vec<Observation>,
        mut prompts: Vec<Prompt>,
        options: &AnalysisOptions,
    ) -> CbieResult<BehaviorProfile> {
        let reference_time = options
            .reference_time
            .unwrap_or_else(|| Utc::now().timestamp());

        for observation in &mut observations {
            observation.user_id.get_or_insert_with(|| user_id.to_string());
        }
        for prompt in &mut prompts {
            prompt.user_id.get_or_insert_with(|| user_id.to_string());
        }

        let output = self.run(user_id, &mut observations, &prompts, reference_time, options)?;

        if options.persist {
            for prompt in &prompts {
                self.documents.put_prompt(prompt)?;
            }
            let all: Vec<&Observation> = observations.iter().collect();
            let written = self.store_observations(user_id, &all)?;
            self.store_profile(&output.profile, written)?;
        }
        Ok(output.profile)
    }

    fn run(
        &self,
        user_id: &str,
        observations: &mut [Observation],
        prompts: &[Prompt],
        reference_time: i64,
        options: &AnalysisOptions,
    ) -> CbieResult<PipelineOutput> {
        let span = cbie_observability::analysis_span!(user_id, observations.len());
        let _guard = span.enter();

        let ctx = PipelineContext {
            scoring: &self.scoring,
            clustering: &self.clustering,
            embedder: self.embedder.as_ref(),
            selector: &self.selector,
            embedding_batch_size: self.config.embedding.batch_size,
        };
        let output = pipeline::run_pipeline(
            &ctx,
            user_id,
            observations,
            prompts,
            reference_time,
            options.generate_archetype,
        )?;

        let profile = &output.profile;
        events::analysis_completed(
            user_id,
            profile.statistics.clusters_formed,
            profile.statistics.noise_observations,
            profile.clusters_in(cbie_core::models::Tier::Primary).count(),
        );
        Ok(output)
    }

    fn store_observations(&self, user_id: &str, observations: &[&Observation]) -> CbieResult<usize> {
        if observations.is_empty() {
            return Ok(0);
        }
        let records: Vec<VectorRecord> = observations
            .iter()
            .map(|o| {
                VectorRecord::new(
                    o.observation_id.clone(),
                    o.embedding.clone().unwrap_or_default(),
                    o.to_metadata(),
                )
            })
            .collect();
        self.vectors.upsert_batch(user_id, &records)
    }

    /// Replace the stored profile, first relating its clusters to the
    /// previous run's by centroid similarity.
    fn store_profile(&self, profile: &BehaviorProfile, observations_written: usize) -> CbieResult<()> {
        let previous = match self.documents.get_profile(&profile.user_id) {
            Ok(previous) => previous,
            Err(e) => {
                warn!(
                    user_id = %profile.user_id,
                    error = %e,
                    "previous profile unreadable, replacing without reconciliation"
                );
                None
            }
        };
        if let Some(previous) = previous {
            let prev: Vec<(&str, &[f32])> = previous
                .clusters
                .iter()
                .map(|c| (c.cluster_id.as_str(), c.centroid.as_slice()))
                .collect();
            let cur: Vec<(&str, &[f32])> = profile
                .clusters
                .iter()
                .map(|c| (c.cluster_id.as_str(), c.centroid.as_slice()))
                .collect();
            let reconciliation = reconcile(&prev, &cur, self.config.clustering.reconcile_min_similarity);
            events::profile_reconciled(
                &profile.user_id,
                reconciliation.carried_over(),
                reconciliation.new_ids.len(),
                reconciliation.retired_ids.len(),
            );
        }

        self.documents.put_profile(profile)?;
        events::profile_persisted(&profile.user_id, observations_written);
        Ok(())
    }
}
