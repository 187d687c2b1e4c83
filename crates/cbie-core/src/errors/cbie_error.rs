use super::{ClusteringError, EmbeddingError, GenerationError, ScoringError, StorageError};

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CbieError {
    /// Analysis from storage found nothing to analyze.
    #[error("no observations found for user {user_id}")]
    ObservationsNotFound { user_id: String },

    #[error("no profile found for user {user_id}")]
    ProfileNotFound { user_id: String },

    #[error("scoring error: {0}")]
    ScoringError(#[from] ScoringError),

    #[error("clustering error: {0}")]
    ClusteringError(#[from] ClusteringError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("generation error: {0}")]
    GenerationError(#[from] GenerationError),

    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl CbieError {
    /// Whether this error means "the requested user data does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CbieError::ObservationsNotFound { .. } | CbieError::ProfileNotFound { .. }
        )
    }

    pub fn config(reason: impl Into<String>) -> Self {
        CbieError::ConfigError {
            reason: reason.into(),
        }
    }
}

pub type CbieResult<T> = Result<T, CbieError>;
