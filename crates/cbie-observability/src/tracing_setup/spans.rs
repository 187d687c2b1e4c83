//! Span definitions per stage: analysis, embedding, clustering, labeling.

/// Span around one full analysis run.
#[macro_export]
macro_rules! analysis_span {
    ($user_id:expr, $observations:expr) => {
        tracing::info_span!("cbie.analysis", user_id = %$user_id, observations = $observations)
    };
}

/// Span around filling missing embeddings.
#[macro_export]
macro_rules! embedding_span {
    ($provider:expr, $missing:expr) => {
        tracing::info_span!("cbie.embedding", provider = %$provider, missing = $missing)
    };
}

/// Span around density clustering.
#[macro_export]
macro_rules! clustering_span {
    ($points:expr) => {
        tracing::info_span!("cbie.clustering", points = $points)
    };
}

/// Span around label, name, and archetype selection.
#[macro_export]
macro_rules! labeling_span {
    ($clusters:expr) => {
        tracing::info_span!("cbie.labeling", clusters = $clusters)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const ANALYSIS: &str = "cbie.analysis";
    pub const EMBEDDING: &str = "cbie.embedding";
    pub const CLUSTERING: &str = "cbie.clustering";
    pub const LABELING: &str = "cbie.labeling";
}
