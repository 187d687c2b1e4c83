/// Text-generation collaborator errors.
///
/// The label selector maps every one of these to a documented fallback value.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generator unavailable: {provider}")]
    Unavailable { provider: String },

    #[error("request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("empty response from {provider}")]
    EmptyResponse { provider: String },
}
