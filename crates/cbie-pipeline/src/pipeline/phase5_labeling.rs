//! Phase 5: cosmetic labels, names, and the profile archetype.

use cbie_core::models::BehaviorCluster;
use cbie_labeling::LabelSelector;

pub fn label_clusters(selector: &LabelSelector, clusters: &mut [BehaviorCluster]) {
    let span = cbie_observability::labeling_span!(clusters.len());
    let _guard = span.enter();

    for cluster in clusters.iter_mut() {
        cluster.label = selector.display_label(&cluster.wordings);
        cluster.name = selector.display_name(&cluster.wordings, cluster.cluster_size, cluster.tier);
    }
}

/// Archetype from the labels of every non-NOISE cluster; `None` when there
/// are none to summarize.
pub fn archetype_for(selector: &LabelSelector, clusters: &[BehaviorCluster]) -> Option<String> {
    let labels: Vec<String> = clusters
        .iter()
        .filter(|c| !c.tier.is_noise())
        .map(|c| c.label.clone())
        .collect();
    if labels.is_empty() {
        return None;
    }
    Some(selector.archetype(&labels))
}
