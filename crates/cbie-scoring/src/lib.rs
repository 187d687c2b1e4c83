//! # cbie-scoring
//!
//! Pure scoring functions: per-observation weight, cluster strength,
//! cluster confidence, and tier assignment. Constants come from an immutable
//! [`ScoringConfig`](cbie_core::config::ScoringConfig) handed in at construction.
//! The interval-record adapter in [`legacy`] is kept apart from the cluster path.

pub mod confidence;
pub mod engine;
pub mod legacy;
pub mod recency;
pub mod strength;
pub mod tier;
pub mod weight;

pub use confidence::ConfidenceScore;
pub use engine::{ClusterScores, ScoringEngine};
pub use legacy::LegacyAdapter;
pub use strength::StrengthScore;
