use std::sync::Arc;

use cbie_core::config::LabelingConfig;
use cbie_core::models::Tier;
use cbie_labeling::{LabelSelector, NoOpGenerator};
use test_fixtures::{FailingGenerator, ScriptedGenerator};

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn selector_with(generator: Arc<dyn cbie_core::traits::ITextGenerator>) -> LabelSelector {
    LabelSelector::new(generator, LabelingConfig::default())
}

#[test]
fn single_member_label_is_verbatim_without_generation() {
    let generator = Arc::new(ScriptedGenerator::always("Should Not Be Used"));
    let selector = selector_with(generator.clone());

    let label = selector.display_label(&texts(&["  Prefers step-by-step answers "]));
    assert_eq!(label, "  Prefers step-by-step answers ");
    assert_eq!(generator.call_count(), 0);
}

#[test]
fn unavailable_generator_falls_back_to_longest_text() {
    let generator = Arc::new(FailingGenerator::new());
    let selector = selector_with(generator.clone());

    let wordings = texts(&[
        "likes code",
        "asks for runnable code samples",
        "wants code",
        "prefers code over prose",
        "code first",
    ]);
    assert_eq!(selector.display_label(&wordings), "asks for runnable code samples");
    assert_eq!(generator.call_count(), 0);
    assert_eq!(selector.stats().fallback_count(), 1);
}

#[test]
fn duplicates_collapsing_to_one_text_skip_generation() {
    let generator = Arc::new(ScriptedGenerator::always("Generated"));
    let selector = selector_with(generator.clone());

    let label = selector.display_label(&texts(&["asks for tables", "asks for tables", "asks for tables"]));
    assert_eq!(label, "asks for tables");
    assert_eq!(generator.call_count(), 0);
}

#[test]
fn generated_label_is_cleaned() {
    let generator = Arc::new(ScriptedGenerator::new(&["\"Code Sample Seeker\"."]));
    let selector = selector_with(generator.clone());

    let label = selector.display_label(&texts(&["wants code", "asks for snippets"]));
    assert_eq!(label, "Code Sample Seeker");
    assert_eq!(generator.call_count(), 1);
    assert_eq!(selector.stats().generated_count(), 1);
}

#[test]
fn overlong_or_empty_label_falls_back() {
    let long_reply = "one two three four five six seven eight nine ten";
    let generator = Arc::new(ScriptedGenerator::new(&[long_reply, "  \"\" "]));
    let selector = selector_with(generator.clone());
    let wordings = texts(&["short", "the longest wording here"]);

    assert_eq!(selector.display_label(&wordings), "the longest wording here");
    assert_eq!(selector.display_label(&wordings), "the longest wording here");
    assert_eq!(generator.call_count(), 2);
    assert_eq!(selector.stats().fallback_count(), 2);
}

#[test]
fn label_prompt_is_capped_at_configured_samples() {
    let generator = Arc::new(ScriptedGenerator::always("Label"));
    let config = LabelingConfig {
        max_label_samples: 3,
        ..LabelingConfig::default()
    };
    let selector = LabelSelector::new(generator.clone(), config);

    let wordings: Vec<String> = (0..12).map(|i| format!("wording number {i}")).collect();
    selector.display_label(&wordings);

    let requests = generator.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].user_prompt.contains("wording number 2"));
    assert!(!requests[0].user_prompt.contains("wording number 3"));
    assert_eq!(requests[0].max_tokens, 30);
}

#[test]
fn name_falls_back_to_title_cased_first_wording() {
    let selector = selector_with(Arc::new(NoOpGenerator));
    let name = selector.display_name(&texts(&["asks for tables", "wants tabular output"]), 2, Tier::Secondary);
    assert_eq!(name, "Asks For Tables");
}

#[test]
fn name_prompt_carries_size_and_tier() {
    let generator = Arc::new(ScriptedGenerator::always("Structured Output Preference"));
    let selector = selector_with(generator.clone());

    let name = selector.display_name(&texts(&["asks for tables", "wants tabular output"]), 6, Tier::Primary);
    assert_eq!(name, "Structured Output Preference");
    let prompt = &generator.requests()[0].user_prompt;
    assert!(prompt.contains("6 times"));
    assert!(prompt.contains("PRIMARY"));
}

#[test]
fn archetype_without_labels_is_unknown() {
    let generator = Arc::new(ScriptedGenerator::always("Visual Learner"));
    let selector = selector_with(generator.clone());
    assert_eq!(selector.archetype(&[]), "Unknown");
    assert_eq!(generator.call_count(), 0);
}

#[test]
fn archetype_failure_is_unknown() {
    let selector = selector_with(Arc::new(FailingGenerator::new()));
    assert_eq!(selector.archetype(&texts(&["Code Seeker"])), "Unknown");
}

#[test]
fn archetype_reply_is_stripped() {
    let generator = Arc::new(ScriptedGenerator::always("'Hands-On Experimenter',"));
    let selector = selector_with(generator.clone());
    let archetype = selector.archetype(&texts(&["Code Seeker", "Tinkerer"]));
    assert_eq!(archetype, "Hands-On Experimenter");

    let request = &generator.requests()[0];
    assert!(request.user_prompt.contains("- Code Seeker\n- Tinkerer"));
    assert_eq!(request.max_tokens, 50);
}
