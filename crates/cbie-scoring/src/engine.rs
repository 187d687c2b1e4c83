use cbie_core::config::ScoringConfig;
use cbie_core::errors::{CbieResult, ScoringError};
use cbie_core::models::{Observation, ScoreBreakdown, Tier};

use crate::confidence::{self, ConfidenceScore};
use crate::recency;
use crate::strength::{self, StrengthScore};
use crate::tier;
use crate::weight;

/// Strength and confidence of one cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterScores {
    pub strength: StrengthScore,
    pub confidence: ConfidenceScore,
    pub mean_adjusted_weight: f64,
    pub recency_factor: f64,
}

impl ClusterScores {
    pub fn breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown {
            raw_strength: self.strength.raw,
            mean_adjusted_weight: self.mean_adjusted_weight,
            recency_factor: self.recency_factor,
            mean_intra_distance: self.confidence.mean_intra_distance,
            consistency: self.confidence.consistency,
            reinforcement: self.confidence.reinforcement,
            clarity_trend: self.confidence.clarity_trend,
        }
    }
}

/// Scoring engine over an immutable calibration config.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    /// Create an engine from a config, rejecting invalid calibrations.
    pub fn new(config: ScoringConfig) -> CbieResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// `credibility^α · clarity^β · confidence^γ`.
    pub fn observation_weight(
        &self,
        credibility: f64,
        clarity: f64,
        extraction_confidence: f64,
    ) -> CbieResult<f64> {
        Ok(weight::observation_weight(
            credibility,
            clarity,
            extraction_confidence,
            self.config.alpha,
            self.config.beta,
            self.config.gamma,
        )?)
    }

    /// Adjusted weight of a point observation: `w · (1 + r)`.
    pub fn adjusted_weight(&self, observation: &Observation) -> CbieResult<f64> {
        let w = self.observation_weight(
            observation.credibility,
            observation.clarity,
            observation.extraction_confidence,
        )?;
        Ok(weight::adjusted_weight(
            w,
            1,
            self.config.reinforcement_multiplier,
            observation.decay_rate,
            0.0,
        ))
    }

    /// Recency factor with the configured decay constant. Empty yields 0.
    pub fn recency_factor(&self, timestamps: &[i64], reference_time: i64) -> f64 {
        recency::recency_factor(timestamps, reference_time, self.config.recency_decay_constant)
    }

    pub fn cluster_strength(
        &self,
        size: usize,
        mean_adjusted_weight: f64,
        recency: f64,
    ) -> CbieResult<StrengthScore> {
        Ok(strength::cluster_strength(size, mean_adjusted_weight, recency)?)
    }

    pub fn cluster_confidence(
        &self,
        intra_distances: &[f64],
        size: usize,
        clarity_points: &[(i64, f64)],
    ) -> CbieResult<ConfidenceScore> {
        Ok(confidence::cluster_confidence(
            intra_distances,
            size,
            clarity_points,
            self.config.clarity_trend_boost,
        )?)
    }

    /// Tier from raw strength.
    pub fn assign_tier(&self, raw_strength: f64) -> Tier {
        tier::assign(
            raw_strength,
            self.config.primary_threshold,
            self.config.secondary_threshold,
        )
    }

    /// Score a cluster from all of its members and their distances to the
    /// cluster's representative point.
    ///
    /// `adjusted_weights` must be parallel to `members`; pass the values the
    /// pipeline computed up front so every observation is weighed once.
    pub fn score_cluster(
        &self,
        members: &[&Observation],
        adjusted_weights: &[f64],
        intra_distances: &[f64],
        reference_time: i64,
    ) -> CbieResult<ClusterScores> {
        if members.is_empty() {
            return Err(ScoringError::empty("cluster members").into());
        }
        for (right, len) in [
            ("adjusted weights", adjusted_weights.len()),
            ("intra distances", intra_distances.len()),
        ] {
            if len != members.len() {
                return Err(ScoringError::LengthMismatch {
                    left: "members".into(),
                    left_len: members.len(),
                    right: right.into(),
                    right_len: len,
                }
                .into());
            }
        }

        let mean_adjusted_weight = weight::mean(adjusted_weights, "adjusted weights")?;
        let timestamps: Vec<i64> = members.iter().map(|o| o.timestamp).collect();
        let recency_factor = self.recency_factor(&timestamps, reference_time);
        let strength = self.cluster_strength(members.len(), mean_adjusted_weight, recency_factor)?;

        let clarity_points: Vec<(i64, f64)> =
            members.iter().map(|o| (o.timestamp, o.clarity)).collect();
        let confidence = self.cluster_confidence(intra_distances, members.len(), &clarity_points)?;

        tracing::debug!(
            size = members.len(),
            raw_strength = strength.raw,
            strength = strength.normalized,
            confidence = confidence.confidence,
            "cluster scored"
        );

        Ok(ClusterScores {
            strength,
            confidence,
            mean_adjusted_weight,
            recency_factor,
        })
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }
}
