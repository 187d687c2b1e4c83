//! Adapter for interval-style behavior records.
//!
//! Converts legacy records into the core `Observation` shape and evaluates
//! the old reinforcement/decay weight. The cluster scoring path never calls
//! into this module.

use cbie_core::config::ScoringConfig;
use cbie_core::constants::{fallback_prompt_id, SECONDS_PER_DAY};
use cbie_core::errors::CbieResult;
use cbie_core::models::{LegacyBehaviorRecord, Observation};

use crate::weight;

pub struct LegacyAdapter {
    config: ScoringConfig,
}

impl LegacyAdapter {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// The record as a point observation stamped at `last_seen`.
    pub fn to_observation(&self, record: &LegacyBehaviorRecord) -> Observation {
        let prompt_id = record
            .prompt_history_ids
            .first()
            .cloned()
            .unwrap_or_else(|| fallback_prompt_id(record.last_seen));

        Observation {
            observation_id: record.behavior_id.clone(),
            text: record.behavior_text.clone(),
            embedding: None,
            credibility: record.credibility,
            clarity: record.clarity_score,
            extraction_confidence: record.extraction_confidence,
            timestamp: record.last_seen,
            prompt_id,
            decay_rate: record.decay_rate,
            user_id: record.user_id.clone(),
            session_id: record.session_id.clone(),
        }
    }

    pub fn days_since_last_seen(record: &LegacyBehaviorRecord, reference_time: i64) -> f64 {
        (reference_time - record.last_seen).max(0) as f64 / SECONDS_PER_DAY
    }

    /// `w · (1 + reinforcement_count·r) · e^(−decay_rate·days_since_last_seen)`.
    pub fn adjusted_weight(&self, record: &LegacyBehaviorRecord, reference_time: i64) -> CbieResult<f64> {
        let w = weight::observation_weight(
            record.credibility,
            record.clarity_score,
            record.extraction_confidence,
            self.config.alpha,
            self.config.beta,
            self.config.gamma,
        )?;
        Ok(weight::adjusted_weight(
            w,
            record.reinforcement_count,
            self.config.reinforcement_multiplier,
            record.decay_rate,
            Self::days_since_last_seen(record, reference_time),
        ))
    }

    /// Convert a batch, keeping input order.
    pub fn to_observations(&self, records: &[LegacyBehaviorRecord]) -> Vec<Observation> {
        records.iter().map(|r| self.to_observation(r)).collect()
    }
}

impl Default for LegacyAdapter {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
