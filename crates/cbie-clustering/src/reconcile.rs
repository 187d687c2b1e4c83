//! Cross-run cluster matching by centroid similarity.
//!
//! Cluster ids are run-local, so the only way to relate two runs is by where
//! their clusters sit in embedding space.

use serde::{Deserialize, Serialize};

use crate::similarity::cosine_similarity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterMatch {
    pub previous_id: String,
    pub current_id: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Best-first.
    pub matches: Vec<ClusterMatch>,
    /// Current clusters with no previous counterpart.
    pub new_ids: Vec<String>,
    /// Previous clusters with no current counterpart.
    pub retired_ids: Vec<String>,
}

impl Reconciliation {
    pub fn carried_over(&self) -> usize {
        self.matches.len()
    }

    pub fn current_for(&self, previous_id: &str) -> Option<&str> {
        self.matches
            .iter()
            .find(|m| m.previous_id == previous_id)
            .map(|m| m.current_id.as_str())
    }
}

/// Greedy one-to-one matching of `(id, centroid)` pairs, highest similarity
/// first, ignoring pairs below `min_similarity`.
pub fn reconcile(
    previous: &[(&str, &[f32])],
    current: &[(&str, &[f32])],
    min_similarity: f64,
) -> Reconciliation {
    let mut candidates: Vec<(usize, usize, f64)> = Vec::new();
    for (p, (_, prev_centroid)) in previous.iter().enumerate() {
        for (c, (_, cur_centroid)) in current.iter().enumerate() {
            let sim = cosine_similarity(prev_centroid, cur_centroid);
            if sim >= min_similarity {
                candidates.push((p, c, sim));
            }
        }
    }
    candidates.sort_by(|a, b| {
        b.2.total_cmp(&a.2)
            .then(a.0.cmp(&b.0))
            .then(a.1.cmp(&b.1))
    });

    let mut prev_taken = vec![false; previous.len()];
    let mut cur_taken = vec![false; current.len()];
    let mut matches = Vec::new();
    for (p, c, similarity) in candidates {
        if prev_taken[p] || cur_taken[c] {
            continue;
        }
        prev_taken[p] = true;
        cur_taken[c] = true;
        matches.push(ClusterMatch {
            previous_id: previous[p].0.to_string(),
            current_id: current[c].0.to_string(),
            similarity,
        });
    }

    Reconciliation {
        matches,
        new_ids: current
            .iter()
            .zip(&cur_taken)
            .filter(|(_, taken)| !**taken)
            .map(|((id, _), _)| id.to_string())
            .collect(),
        retired_ids: previous
            .iter()
            .zip(&prev_taken)
            .filter(|(_, taken)| !**taken)
            .map(|((id, _), _)| id.to_string())
            .collect(),
    }
}
