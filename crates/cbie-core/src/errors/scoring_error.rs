/// Precondition failures in the scoring functions.
///
/// These indicate a caller bug, never a data condition to default around.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("empty input: {what}")]
    EmptyInput { what: String },

    #[error("invalid score {name} = {value}: must be finite and in (0, 1]")]
    InvalidScore { name: String, value: f64 },

    #[error("length mismatch: {left} has {left_len} entries, {right} has {right_len}")]
    LengthMismatch {
        left: String,
        left_len: usize,
        right: String,
        right_len: usize,
    },
}

impl ScoringError {
    pub fn empty(what: impl Into<String>) -> Self {
        ScoringError::EmptyInput { what: what.into() }
    }
}
