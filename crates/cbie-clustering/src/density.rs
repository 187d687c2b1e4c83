//! HDBSCAN labelling plus the epsilon rules layered on top of it.
//!
//! The library never selects the hierarchy root as a cluster. When its result
//! is "no cluster" or "one cluster holding every point", the root case is
//! resolved with the epsilon-neighbourhood rule instead: points are linked
//! when their distance is within `epsilon`, and connected groups of at least
//! `min_cluster_size` points become clusters. Otherwise clusters whose
//! closest members lie within `epsilon` of each other are merged.

use std::collections::BTreeMap;

use hdbscan::{Hdbscan, HdbscanHyperParams};
use tracing::{debug, warn};

use crate::similarity::euclidean_distance;

/// Group indices of `points` (already L2-normalized) into clusters.
///
/// Points in no returned group are noise.
#[allow(clippy::ptr_arg)]
pub fn density_groups(
    points: &Vec<Vec<f32>>,
    min_cluster_size: usize,
    min_samples: usize,
    epsilon: f64,
) -> Vec<Vec<usize>> {
    if points.len() < min_cluster_size {
        return vec![];
    }

    let hyper_params = HdbscanHyperParams::builder()
        .min_cluster_size(min_cluster_size)
        .min_samples(min_samples)
        .build();

    let groups = match Hdbscan::new(points, hyper_params).cluster() {
        Ok(labels) => group_labels(&labels),
        Err(e) => {
            warn!(error = ?e, points = points.len(), "hdbscan failed, resolving as a single root");
            vec![]
        }
    };

    let spans_everything = groups.len() == 1 && groups[0].len() == points.len();
    if groups.is_empty() || spans_everything {
        let resolved = epsilon_components(points, epsilon, min_cluster_size);
        debug!(
            groups = resolved.len(),
            epsilon, "root case resolved by epsilon neighbourhood"
        );
        return resolved;
    }

    if epsilon > 0.0 {
        merge_within_epsilon(points, groups, epsilon)
    } else {
        groups
    }
}

fn group_labels(labels: &[i32]) -> Vec<Vec<usize>> {
    let mut by_label: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        if label >= 0 {
            by_label.entry(label).or_default().push(idx);
        }
    }
    by_label.into_values().collect()
}

/// Connected components of the graph linking points within `epsilon`,
/// keeping components of at least `min_size` points.
pub fn epsilon_components(points: &[Vec<f32>], epsilon: f64, min_size: usize) -> Vec<Vec<usize>> {
    let mut sets = DisjointSets::new(points.len());
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if euclidean_distance(&points[i], &points[j]) <= epsilon {
                sets.union(i, j);
            }
        }
    }
    sets.groups()
        .into_iter()
        .filter(|g| g.len() >= min_size)
        .collect()
}

/// Merge groups whose closest pair of members is within `epsilon`.
pub fn merge_within_epsilon(
    points: &[Vec<f32>],
    groups: Vec<Vec<usize>>,
    epsilon: f64,
) -> Vec<Vec<usize>> {
    let mut sets = DisjointSets::new(groups.len());
    for a in 0..groups.len() {
        for b in (a + 1)..groups.len() {
            let close = groups[a].iter().any(|&i| {
                groups[b]
                    .iter()
                    .any(|&j| euclidean_distance(&points[i], &points[j]) <= epsilon)
            });
            if close {
                sets.union(a, b);
            }
        }
    }

    let merged = sets.groups();
    if merged.len() < groups.len() {
        debug!(before = groups.len(), after = merged.len(), "merged clusters within epsilon");
    }
    merged
        .into_iter()
        .map(|group_ids| {
            let mut members: Vec<usize> = group_ids
                .into_iter()
                .flat_map(|g| groups[g].iter().copied())
                .collect();
            members.sort_unstable();
            members
        })
        .collect()
}

/// Union-find over `0..n`.
struct DisjointSets {
    parent: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            // Lower index wins so roots are deterministic.
            let (keep, drop) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[drop] = keep;
        }
    }

    /// Sets in order of their smallest member; members ascending.
    fn groups(&mut self) -> Vec<Vec<usize>> {
        let mut by_root: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for i in 0..self.parent.len() {
            let root = self.find(i);
            by_root.entry(root).or_default().push(i);
        }
        by_root.into_values().collect()
    }
}
