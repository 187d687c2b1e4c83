use cbie_core::constants::SECONDS_PER_DAY;

/// Recency factor: `mean over t of e^(−k·(T−t)/86400)`.
///
/// Elapsed time is clamped at zero, so future-stamped evidence counts as
/// fully recent. No timestamps yields 0.
pub fn recency_factor(timestamps: &[i64], reference_time: i64, decay_constant: f64) -> f64 {
    if timestamps.is_empty() {
        return 0.0;
    }
    let total: f64 = timestamps
        .iter()
        .map(|&t| {
            let elapsed_days = (reference_time - t).max(0) as f64 / SECONDS_PER_DAY;
            (-decay_constant * elapsed_days).exp()
        })
        .sum();
    total / timestamps.len() as f64
}
