use serde::{Deserialize, Serialize};

/// Per-request analysis switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Generate an archetype from the non-NOISE labels.
    pub generate_archetype: bool,
    /// Unix seconds used as "now" for recency. Defaults to the wall clock.
    pub reference_time: Option<i64>,
    /// Write observations, prompts, and the profile back to the stores.
    pub persist: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            generate_archetype: true,
            reference_time: None,
            persist: true,
        }
    }
}

impl AnalysisOptions {
    pub fn at(mut self, reference_time: i64) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    pub fn without_persistence(mut self) -> Self {
        self.persist = false;
        self
    }

    pub fn without_archetype(mut self) -> Self {
        self.generate_archetype = false;
        self
    }
}
