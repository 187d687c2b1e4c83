//! Structured log events for analysis outcomes.

/// A profile was assembled.
pub fn analysis_completed(user_id: &str, clusters: usize, noise: usize, primary: usize) {
    tracing::info!(
        event = "analysis_completed",
        user_id = %user_id,
        clusters = clusters,
        noise = noise,
        primary = primary,
        "analysis completed"
    );
}

/// A new profile was compared with the one it replaces.
pub fn profile_reconciled(user_id: &str, carried_over: usize, new: usize, retired: usize) {
    tracing::info!(
        event = "profile_reconciled",
        user_id = %user_id,
        carried_over = carried_over,
        new = new,
        retired = retired,
        "profile reconciled against previous run"
    );
}

/// A profile was written to the document store.
pub fn profile_persisted(user_id: &str, observations_written: usize) {
    tracing::info!(
        event = "profile_persisted",
        user_id = %user_id,
        observations_written = observations_written,
        "profile persisted"
    );
}

/// Clustering quality was below expectations.
pub fn clustering_degraded(user_id: &str, noise_ratio: f64, clusters: usize) {
    tracing::warn!(
        event = "clustering_degraded",
        user_id = %user_id,
        noise_ratio = noise_ratio,
        clusters = clusters,
        "most observations were left unclustered"
    );
}
