/// Seconds per day, used for every timestamp-to-days conversion.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Archetype value stored when generation fails or has nothing to work with.
pub const UNKNOWN_ARCHETYPE: &str = "Unknown";

/// Prefix for run-local cluster handles (`cluster_0`, `cluster_1`, ...).
pub const CLUSTER_ID_PREFIX: &str = "cluster";

/// Prefix used to synthesize a prompt reference when none is stored.
pub const PROMPT_ID_PREFIX: &str = "prompt";

/// Metadata key that every vector-store record carries.
pub const USER_ID_KEY: &str = "user_id";

/// Placeholder text returned by the context renderer when no cluster qualifies.
pub const EMPTY_CONTEXT_TEXT: &str = "No significant behavioral patterns detected.";

/// Build a cluster handle from its run-local index.
pub fn cluster_id(index: usize) -> String {
    format!("{CLUSTER_ID_PREFIX}_{index}")
}

/// Build the fallback prompt reference for a timestamp.
pub fn fallback_prompt_id(timestamp: i64) -> String {
    format!("{PROMPT_ID_PREFIX}_{timestamp}")
}

/// Quality score assumed for stored observations missing one.
pub const DEFAULT_STORED_QUALITY_SCORE: f64 = 0.8;
