//! # cbie-core
//!
//! Foundation crate for the behavior-profiling engine.
//! Defines the data model, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CbieConfig;
pub use errors::{CbieError, CbieResult};
pub use models::{BehaviorCluster, BehaviorProfile, Observation, Prompt, Tier};
