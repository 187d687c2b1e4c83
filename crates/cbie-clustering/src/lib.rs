//! # cbie-clustering
//!
//! Density-based grouping of one user's observation embeddings.
//! HDBSCAN over L2-normalized vectors (Euclidean distance as a cosine proxy),
//! epsilon merging of nearby micro-clusters, per-cluster centroid and member
//! distances, run statistics, and centroid-based reconciliation between runs.

pub mod density;
pub mod engine;
pub mod reconcile;
pub mod similarity;
pub mod stats;

pub use engine::{ClusterGroup, ClusteringEngine, ClusteringOutput};
pub use reconcile::{reconcile, ClusterMatch, Reconciliation};
pub use stats::{assess_quality, ClusteringStats, QualityAssessment};
