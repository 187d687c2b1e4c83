use cbie_core::models::Tier;
use cbie_scoring::confidence::{cluster_confidence, reinforcement};
use cbie_scoring::recency::recency_factor;
use cbie_scoring::strength::cluster_strength;
use cbie_scoring::tier;
use cbie_scoring::weight::observation_weight;
use proptest::prelude::*;

fn score() -> impl Strategy<Value = f64> {
    (1u32..=1000).prop_map(|v| f64::from(v) / 1000.0)
}

fn exponent() -> impl Strategy<Value = f64> {
    (1u32..=100).prop_map(|v| f64::from(v) / 100.0)
}

proptest! {
    #[test]
    fn weight_is_in_unit_interval(
        cred in score(), clar in score(), conf in score(),
        a in exponent(), b in exponent(), g in exponent(),
    ) {
        let w = observation_weight(cred, clar, conf, a, b, g).unwrap();
        prop_assert!(w > 0.0 && w <= 1.0, "weight {w}");
    }

    #[test]
    fn strength_is_in_half_open_unit_interval(
        n in 1usize..500, m in 0.0f64..1.01, rho in 0.0f64..=1.0,
    ) {
        let s = cluster_strength(n, m, rho).unwrap();
        prop_assert!(s.normalized >= 0.0 && s.normalized < 1.0);
    }

    #[test]
    fn strength_is_monotone_in_size(
        n in 1usize..500, m in 0.01f64..1.01, rho in 0.01f64..=1.0,
    ) {
        let small = cluster_strength(n, m, rho).unwrap();
        let large = cluster_strength(n + 1, m, rho).unwrap();
        prop_assert!(large.raw >= small.raw);
        prop_assert!(large.normalized >= small.normalized);
    }

    #[test]
    fn confidence_is_in_unit_interval(
        distances in prop::collection::vec(0.0f64..2.0, 1..20),
        clarity in prop::collection::vec(score(), 1..20),
        boost in 0.0f64..0.5,
    ) {
        let n = distances.len();
        let points: Vec<(i64, f64)> = clarity
            .iter()
            .enumerate()
            .map(|(i, c)| (i as i64, *c))
            .collect();
        let c = cluster_confidence(&distances, n, &points, boost).unwrap();
        prop_assert!((0.0..=1.0).contains(&c.confidence));
    }

    #[test]
    fn pre_boost_confidence_never_exceeds_either_factor(
        distances in prop::collection::vec(0.0f64..2.0, 1..20),
    ) {
        let n = distances.len();
        let flat: Vec<(i64, f64)> = (0..n as i64).map(|i| (i, 0.5)).collect();
        let c = cluster_confidence(&distances, n, &flat, 0.1).unwrap();
        prop_assert!(c.confidence <= c.consistency + 1e-12);
        prop_assert!(c.confidence <= reinforcement(n) + 1e-12);
    }

    #[test]
    fn recency_is_in_unit_interval(
        timestamps in prop::collection::vec(0i64..2_000_000_000, 1..30),
        reference in 0i64..2_000_000_000,
    ) {
        let rho = recency_factor(&timestamps, reference, 0.01);
        prop_assert!(rho > 0.0 && rho <= 1.0);
    }

    #[test]
    fn tier_is_monotone_in_strength(a in 0.0f64..3.0, b in 0.0f64..3.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(tier::assign(hi, 0.8, 0.4).rank() <= tier::assign(lo, 0.8, 0.4).rank());
        prop_assert_eq!(tier::assign(hi.max(0.8), 0.8, 0.4), Tier::Primary);
    }
}
