use cbie_core::models::{Observation, Prompt, Tier};
use serde::Deserialize;

/// What a golden scenario must produce.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioExpectation {
    pub clusters_formed: usize,
    pub noise_observations: usize,
    /// Tier per cluster, in profile order.
    pub tiers: Vec<Tier>,
}

/// A golden analysis scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioFixture {
    pub name: String,
    pub description: String,
    pub user_id: String,
    pub reference_time: i64,
    pub observations: Vec<Observation>,
    #[serde(default)]
    pub prompts: Vec<Prompt>,
    pub expected: ScenarioExpectation,
}

/// Load `golden/scenarios/<file_name>`.
pub fn load_scenario(file_name: &str) -> ScenarioFixture {
    crate::load_fixture(&format!("scenarios/{file_name}"))
}
