//! Prompt-injection rendering of a profile.

use serde::{Deserialize, Serialize};

use cbie_core::constants::EMPTY_CONTEXT_TEXT;
use cbie_core::models::{BehaviorCluster, BehaviorProfile};

/// Normalized strength at or above which a behavior counts as strong.
pub const STRONG_BEHAVIOR_STRENGTH: f64 = 0.40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextStyle {
    /// Label, strength and confidence percentages, up to three examples.
    Detailed,
    /// Label and strength percentage only.
    Compact,
    /// Imperative lead-in for a system prompt.
    SystemPrompt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextOptions {
    /// Minimum normalized strength.
    pub min_strength: f64,
    pub min_confidence: f64,
    pub max_behaviors: usize,
    pub include_variations: bool,
    pub include_archetype: bool,
    pub style: ContextStyle,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            min_strength: 0.30,
            min_confidence: 0.40,
            max_behaviors: 5,
            include_variations: true,
            include_archetype: true,
            style: ContextStyle::Detailed,
        }
    }
}

fn percent(value: f64) -> u32 {
    (value * 100.0).floor().clamp(0.0, 100.0) as u32
}

/// Render the qualifying clusters of `profile`.
pub fn render_context(profile: &BehaviorProfile, options: &ContextOptions) -> String {
    let mut selected: Vec<&BehaviorCluster> = profile
        .non_noise_clusters()
        .filter(|c| c.strength >= options.min_strength && c.confidence >= options.min_confidence)
        .collect();
    selected.sort_by(|a, b| b.strength.total_cmp(&a.strength));
    selected.truncate(options.max_behaviors);

    if selected.is_empty() {
        return EMPTY_CONTEXT_TEXT.to_string();
    }

    let archetype = if options.include_archetype {
        profile.archetype.as_deref()
    } else {
        None
    };

    match options.style {
        ContextStyle::Detailed => detailed(&selected, archetype, options.include_variations),
        ContextStyle::Compact => compact(&selected, archetype),
        ContextStyle::SystemPrompt => system_prompt(&selected, options.include_variations),
    }
}

fn detailed(clusters: &[&BehaviorCluster], archetype: Option<&str>, variations: bool) -> String {
    let mut lines = vec!["# User Behavioral Profile".to_string()];
    if let Some(archetype) = archetype {
        lines.push(format!("Archetype: {archetype}"));
    }
    lines.push(String::new());
    lines.push("## Communication Preferences:".to_string());
    lines.push(String::new());

    for (i, cluster) in clusters.iter().enumerate() {
        lines.push(format!(
            "{}. {} (strength: {}%, confidence: {}%)",
            i + 1,
            cluster.label,
            percent(cluster.strength),
            percent(cluster.confidence)
        ));
        let examples: Vec<&str> = cluster.distinct_wordings().into_iter().take(3).collect();
        if variations && !examples.is_empty() {
            lines.push(format!("   Examples: \"{}\"", examples.join(", ")));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

fn compact(clusters: &[&BehaviorCluster], archetype: Option<&str>) -> String {
    let mut lines = Vec::new();
    if let Some(archetype) = archetype {
        lines.push(format!("User Type: {archetype}"));
    }
    lines.push("Preferences:".to_string());
    for cluster in clusters {
        lines.push(format!("- {} ({}%)", cluster.label, percent(cluster.strength)));
    }
    lines.join("\n")
}

fn system_prompt(clusters: &[&BehaviorCluster], variations: bool) -> String {
    let mut lines = vec![
        "You are assisting a user with the following communication preferences:".to_string(),
        String::new(),
    ];
    for (i, cluster) in clusters.iter().enumerate() {
        let mut line = format!(
            "{}. {} ({}% strength)",
            i + 1,
            cluster.label,
            percent(cluster.strength)
        );
        if variations {
            if let Some(example) = cluster.distinct_wordings().first() {
                line.push_str(&format!(" - Often uses phrases like: \"{example}\""));
            }
        }
        lines.push(line);
    }
    lines.push(String::new());
    lines.push(
        "Adapt your responses to match these preferences while maintaining accuracy and helpfulness."
            .to_string(),
    );
    lines.join("\n")
}

/// Aggregate view over every cluster in a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSummary {
    pub total_clusters: usize,
    pub strong_behaviors: usize,
    pub average_strength: f64,
    pub average_confidence: f64,
    pub top_behavior: Option<String>,
}

impl BehaviorSummary {
    pub fn from_profile(profile: &BehaviorProfile) -> Self {
        let clusters = &profile.clusters;
        if clusters.is_empty() {
            return Self {
                total_clusters: 0,
                strong_behaviors: 0,
                average_strength: 0.0,
                average_confidence: 0.0,
                top_behavior: None,
            };
        }
        let n = clusters.len() as f64;
        Self {
            total_clusters: clusters.len(),
            strong_behaviors: clusters
                .iter()
                .filter(|c| c.strength >= STRONG_BEHAVIOR_STRENGTH)
                .count(),
            average_strength: clusters.iter().map(|c| c.strength).sum::<f64>() / n,
            average_confidence: clusters.iter().map(|c| c.confidence).sum::<f64>() / n,
            top_behavior: clusters.first().map(|c| c.label.clone()),
        }
    }
}
