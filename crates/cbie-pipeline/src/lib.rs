//! # cbie-pipeline
//!
//! One linear pass per analysis request: weigh observations, fill missing
//! embeddings, cluster, score and tier every cluster, label, and assemble the
//! profile. The pipeline keeps no state between runs; collaborators own all
//! persistent data.

pub mod context;
pub mod engine;
pub mod options;
pub mod pipeline;
pub mod queries;

pub use context::{render_context, BehaviorSummary, ContextOptions, ContextStyle};
pub use engine::ClusterAnalysisPipeline;
pub use options::AnalysisOptions;
pub use queries::CoreBehavior;
