use std::collections::HashSet;

use cbie_clustering::ClusteringEngine;
use proptest::prelude::*;

fn embeddings() -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-1.0f32..1.0, 4), 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn output_partitions_the_input(vectors in embeddings()) {
        let ids: Vec<String> = (0..vectors.len()).map(|i| format!("o{i}")).collect();
        let points: Vec<(&str, &[f32])> = ids
            .iter()
            .zip(&vectors)
            .map(|(id, v)| (id.as_str(), v.as_slice()))
            .collect();
        let engine = ClusteringEngine::default();
        let out = engine.cluster(&points).unwrap();

        let mut seen = HashSet::new();
        for cluster in &out.clusters {
            prop_assert!(cluster.size() >= engine.config().min_cluster_size);
            prop_assert_eq!(cluster.distances.len(), cluster.size());
            prop_assert_eq!(cluster.centroid.len(), 4);
            for id in &cluster.member_ids {
                prop_assert!(seen.insert(id.clone()), "{} in two clusters", id);
            }
        }
        for id in &out.noise_ids {
            prop_assert!(seen.insert(id.clone()), "{} both noise and clustered", id);
        }
        prop_assert_eq!(seen.len(), vectors.len());
    }

    #[test]
    fn clusters_are_ordered_largest_first(vectors in embeddings()) {
        let ids: Vec<String> = (0..vectors.len()).map(|i| format!("o{i}")).collect();
        let points: Vec<(&str, &[f32])> = ids
            .iter()
            .zip(&vectors)
            .map(|(id, v)| (id.as_str(), v.as_slice()))
            .collect();
        let out = ClusteringEngine::default().cluster(&points).unwrap();
        for pair in out.clusters.windows(2) {
            prop_assert!(pair[0].size() >= pair[1].size());
        }
    }
}
