use cbie_core::models::Tier;

/// `strength ≥ primary → PRIMARY`, `≥ secondary → SECONDARY`, else `NOISE`.
pub fn assign(strength: f64, primary_threshold: f64, secondary_threshold: f64) -> Tier {
    if strength >= primary_threshold {
        Tier::Primary
    } else if strength >= secondary_threshold {
        Tier::Secondary
    } else {
        Tier::Noise
    }
}
