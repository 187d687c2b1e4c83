use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cluster::BehaviorCluster;
use super::tier::Tier;

/// Counts describing one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileStatistics {
    pub total_observations: usize,
    pub clusters_formed: usize,
    pub clustered_observations: usize,
    pub noise_observations: usize,
    pub total_prompts: usize,
    /// `max - min` prompt timestamp, in days.
    pub time_span_days: f64,
}

/// One user's analysis snapshot. Replaces any prior snapshot on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorProfile {
    pub user_id: String,
    pub generated_at: DateTime<Utc>,
    pub clusters: Vec<BehaviorCluster>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype: Option<String>,
    pub statistics: ProfileStatistics,
}

impl BehaviorProfile {
    pub fn clusters_in(&self, tier: Tier) -> impl Iterator<Item = &BehaviorCluster> {
        self.clusters.iter().filter(move |c| c.tier == tier)
    }

    pub fn non_noise_clusters(&self) -> impl Iterator<Item = &BehaviorCluster> {
        self.clusters.iter().filter(|c| !c.tier.is_noise())
    }
}
