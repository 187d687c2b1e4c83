pub mod cluster;
pub mod completion;
pub mod legacy_record;
pub mod observation;
pub mod profile;
pub mod prompt;
pub mod tier;
pub mod vector_record;

pub use cluster::{BehaviorCluster, ScoreBreakdown};
pub use completion::CompletionRequest;
pub use legacy_record::LegacyBehaviorRecord;
pub use observation::Observation;
pub use profile::{BehaviorProfile, ProfileStatistics};
pub use prompt::Prompt;
pub use tier::{ParseTierError, Tier};
pub use vector_record::{MetadataFilter, VectorRecord};
