//! Read-side operations over stored profiles.

use serde::{Deserialize, Serialize};

use cbie_core::errors::{CbieError, CbieResult};
use cbie_core::models::{BehaviorProfile, Tier};
use tracing::info;

use crate::context::{render_context, BehaviorSummary, ContextOptions};
use crate::engine::ClusterAnalysisPipeline;

/// A non-NOISE cluster as exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreBehavior {
    pub cluster_id: String,
    pub label: String,
    pub name: String,
    pub tier: Tier,
    pub strength: f64,
    pub confidence: f64,
}

impl ClusterAnalysisPipeline {
    pub fn get_profile(&self, user_id: &str) -> CbieResult<BehaviorProfile> {
        self.documents
            .get_profile(user_id)?
            .ok_or_else(|| CbieError::ProfileNotFound {
                user_id: user_id.to_string(),
            })
    }

    /// Non-NOISE clusters, PRIMARY first, profile order within a tier.
    pub fn list_core_behaviors(&self, user_id: &str) -> CbieResult<Vec<CoreBehavior>> {
        let profile = self.get_profile(user_id)?;
        let mut behaviors: Vec<CoreBehavior> = profile
            .non_noise_clusters()
            .map(|c| CoreBehavior {
                cluster_id: c.cluster_id.clone(),
                label: c.label.clone(),
                name: c.name.clone(),
                tier: c.tier,
                strength: c.strength,
                confidence: c.confidence,
            })
            .collect();
        behaviors.sort_by_key(|b| b.tier.rank());
        Ok(behaviors)
    }

    /// Regenerate the archetype from `labels`, or from the stored profile's
    /// non-NOISE labels, and store it on the profile.
    pub fn assign_archetype(&self, user_id: &str, labels: Option<&[String]>) -> CbieResult<String> {
        let mut profile = self.get_profile(user_id)?;
        let labels: Vec<String> = match labels {
            Some(labels) => labels.to_vec(),
            None => profile.non_noise_clusters().map(|c| c.label.clone()).collect(),
        };

        let archetype = self.selector.archetype(&labels);
        profile.archetype = Some(archetype.clone());
        self.documents.put_profile(&profile)?;
        info!(user_id, archetype = %archetype, labels = labels.len(), "archetype assigned");
        Ok(archetype)
    }

    /// Text block describing the user's dominant behaviors for prompt injection.
    pub fn llm_context(&self, user_id: &str, options: &ContextOptions) -> CbieResult<String> {
        let profile = self.get_profile(user_id)?;
        Ok(render_context(&profile, options))
    }

    pub fn behavior_summary(&self, user_id: &str) -> CbieResult<BehaviorSummary> {
        Ok(BehaviorSummary::from_profile(&self.get_profile(user_id)?))
    }
}
