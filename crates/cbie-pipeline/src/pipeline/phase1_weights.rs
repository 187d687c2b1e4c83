//! Phase 1: per-observation adjusted weight.

use cbie_core::errors::CbieResult;
use cbie_core::models::Observation;
use cbie_scoring::ScoringEngine;

/// Adjusted weight of every observation, parallel to the input. Any quality
/// score outside (0, 1] fails the run.
pub fn adjusted_weights(scoring: &ScoringEngine, observations: &[Observation]) -> CbieResult<Vec<f64>> {
    observations
        .iter()
        .map(|o| scoring.adjusted_weight(o))
        .collect()
}
