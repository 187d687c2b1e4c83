use cbie_core::errors::ScoringError;

/// Reject quality scores outside (0, 1].
pub fn validate_score(name: &str, value: f64) -> Result<f64, ScoringError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(ScoringError::InvalidScore {
            name: name.to_string(),
            value,
        })
    }
}

/// Observation weight: `credibility^α · clarity^β · confidence^γ`.
///
/// Range: (0.0, 1.0] for valid scores and exponents in (0, 1].
pub fn observation_weight(
    credibility: f64,
    clarity: f64,
    confidence: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
) -> Result<f64, ScoringError> {
    let credibility = validate_score("credibility", credibility)?;
    let clarity = validate_score("clarity", clarity)?;
    let confidence = validate_score("extraction_confidence", confidence)?;

    Ok(credibility.powf(alpha) * clarity.powf(beta) * confidence.powf(gamma))
}

/// Adjusted weight: `w · (1 + reinforcement_count·r) · e^(−decay_rate·days)`.
///
/// A point observation has `reinforcement_count = 1` and zero elapsed days,
/// which reduces to `w · (1 + r)`.
pub fn adjusted_weight(
    weight: f64,
    reinforcement_count: u32,
    multiplier: f64,
    decay_rate: f64,
    days: f64,
) -> f64 {
    let reinforcement = 1.0 + f64::from(reinforcement_count) * multiplier;
    let decay = (-decay_rate * days.max(0.0)).exp();
    weight * reinforcement * decay
}

/// Arithmetic mean; rejects empty input.
pub fn mean(values: &[f64], what: &str) -> Result<f64, ScoringError> {
    if values.is_empty() {
        return Err(ScoringError::empty(what));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}
