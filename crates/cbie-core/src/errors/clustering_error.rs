/// Clustering input validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ClusteringError {
    #[error("dimension mismatch for {id}: expected {expected}, got {actual}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("non-finite value in embedding {id} at position {position}")]
    NonFiniteValue { id: String, position: usize },

    #[error("embedding {id} is empty")]
    EmptyEmbedding { id: String },

    #[error("invalid clustering parameter: {reason}")]
    InvalidParameter { reason: String },
}
