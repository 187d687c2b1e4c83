//! Error taxonomy. One enum per subsystem, all folded into [`CbieError`].

mod cbie_error;
mod clustering_error;
mod embedding_error;
mod generation_error;
mod scoring_error;
mod storage_error;

pub use cbie_error::{CbieError, CbieResult};
pub use clustering_error::ClusteringError;
pub use embedding_error::EmbeddingError;
pub use generation_error::GenerationError;
pub use scoring_error::ScoringError;
pub use storage_error::StorageError;
