//! Prompt templates for the three generation kinds.

use cbie_core::models::Tier;

pub const LABEL_SYSTEM_PROMPT: &str = "You are an expert in behavioral psychology. \
Your task is to summarize several phrasings of the same user behavior as one short label.";

pub const NAME_SYSTEM_PROMPT: &str = "You are an expert in behavioral psychology and user profiling. \
Your task is to give a recurring user behavior a clear, descriptive name.";

pub const ARCHETYPE_SYSTEM_PROMPT: &str = "You are an expert in behavioral psychology and user profiling. \
Your task is to analyze user behaviors and assign a concise, descriptive archetype label.";

fn bullet_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn label_prompt(wordings: &[&str], max_words: usize) -> String {
    format!(
        "The following observations describe the same behavior of one user:\n\n{}\n\n\
Write one concise label (at most {max_words} words) that captures this behavior.\n\
Return ONLY the label, nothing else.",
        bullet_list(wordings)
    )
}

pub fn name_prompt(wordings: &[&str], size: usize, tier: Tier, max_words: usize) -> String {
    format!(
        "A behavior pattern was observed {size} times and classified as {tier}.\n\
Sample observations:\n\n{}\n\n\
Write a descriptive name for this pattern (at most {max_words} words).\n\
Return ONLY the name, nothing else.",
        bullet_list(wordings)
    )
}

pub fn archetype_prompt(labels: &[&str]) -> String {
    format!(
        "Given the following user behaviors:\n\n{}\n\n\
Classify the user into a single, concise behavioral archetype.\n\
The archetype should be a descriptive label (2-4 words) that captures the essence of these behaviors.\n\n\
Examples of good archetypes: \"Visual Learner\", \"Detail-Oriented Analyst\", \
\"Quick Reference Seeker\", \"Hands-On Experimenter\"\n\n\
Return ONLY the archetype label, nothing else.",
        bullet_list(labels)
    )
}
