use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{CbieError, CbieResult};

/// Scoring engine calibration constants.
///
/// Loaded once and handed to the scoring engine at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Credibility exponent.
    pub alpha: f64,
    /// Clarity exponent.
    pub beta: f64,
    /// Extraction-confidence exponent.
    pub gamma: f64,
    /// Reinforcement multiplier `r` in the adjusted-weight formula.
    pub reinforcement_multiplier: f64,
    /// Decay constant `k` of the cluster recency factor (per day).
    /// Deliberately separate from each observation's own decay rate.
    pub recency_decay_constant: f64,
    /// Decay rate assumed for observations that carry none.
    pub default_decay_rate: f64,
    /// Raw strength at or above which a cluster is PRIMARY.
    pub primary_threshold: f64,
    /// Raw strength at or above which a cluster is SECONDARY.
    pub secondary_threshold: f64,
    /// Maximum relative confidence boost from an improving clarity trend.
    pub clarity_trend_boost: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            alpha: defaults::DEFAULT_ALPHA,
            beta: defaults::DEFAULT_BETA,
            gamma: defaults::DEFAULT_GAMMA,
            reinforcement_multiplier: defaults::DEFAULT_REINFORCEMENT_MULTIPLIER,
            recency_decay_constant: defaults::DEFAULT_RECENCY_DECAY_CONSTANT,
            default_decay_rate: defaults::DEFAULT_OBSERVATION_DECAY_RATE,
            primary_threshold: defaults::DEFAULT_PRIMARY_THRESHOLD,
            secondary_threshold: defaults::DEFAULT_SECONDARY_THRESHOLD,
            clarity_trend_boost: defaults::DEFAULT_CLARITY_TREND_BOOST,
        }
    }
}

impl ScoringConfig {
    /// Reject configurations the formulas are not defined for.
    pub fn validate(&self) -> CbieResult<()> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(CbieError::config(format!(
                    "scoring.{name} must be in (0, 1], got {value}"
                )));
            }
        }
        for (name, value) in [
            ("reinforcement_multiplier", self.reinforcement_multiplier),
            ("recency_decay_constant", self.recency_decay_constant),
            ("default_decay_rate", self.default_decay_rate),
            ("clarity_trend_boost", self.clarity_trend_boost),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CbieError::config(format!(
                    "scoring.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !(self.secondary_threshold.is_finite() && self.primary_threshold.is_finite())
            || self.secondary_threshold > self.primary_threshold
        {
            return Err(CbieError::config(format!(
                "scoring thresholds inverted: secondary {} > primary {}",
                self.secondary_threshold, self.primary_threshold
            )));
        }
        Ok(())
    }
}
