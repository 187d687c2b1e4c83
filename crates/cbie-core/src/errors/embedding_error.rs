/// Embedding collaborator errors. Always fatal to an analysis run.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("count mismatch: sent {sent} texts, received {received} embeddings")]
    CountMismatch { sent: usize, received: usize },
}
