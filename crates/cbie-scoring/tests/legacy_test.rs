use cbie_core::models::LegacyBehaviorRecord;
use cbie_scoring::LegacyAdapter;

const DAY: i64 = 86_400;

fn record(reinforcement_count: u32, history: Vec<String>) -> LegacyBehaviorRecord {
    LegacyBehaviorRecord {
        behavior_id: "b-1".into(),
        behavior_text: "asks for step-by-step answers".into(),
        credibility: 0.9,
        clarity_score: 0.9,
        extraction_confidence: 0.9,
        reinforcement_count,
        decay_rate: 0.05,
        created_at: 1_000,
        last_seen: 10 * DAY,
        prompt_history_ids: history,
        user_id: Some("u-1".into()),
        session_id: None,
    }
}

#[test]
fn to_observation_uses_last_seen_and_first_prompt() {
    let adapter = LegacyAdapter::default();
    let obs = adapter.to_observation(&record(3, vec!["p-7".into(), "p-8".into()]));
    assert_eq!(obs.observation_id, "b-1");
    assert_eq!(obs.timestamp, 10 * DAY);
    assert_eq!(obs.prompt_id, "p-7");
    assert_eq!(obs.clarity, 0.9);
    assert_eq!(obs.decay_rate, 0.05);
    assert_eq!(obs.user_id.as_deref(), Some("u-1"));
}

#[test]
fn to_observation_without_history_synthesizes_prompt_id() {
    let adapter = LegacyAdapter::default();
    let obs = adapter.to_observation(&record(1, vec![]));
    assert_eq!(obs.prompt_id, format!("prompt_{}", 10 * DAY));
}

#[test]
fn to_observations_keeps_input_order() {
    let adapter = LegacyAdapter::default();
    let mut second = record(2, vec!["p-9".into()]);
    second.behavior_id = "b-2".into();
    let observations = adapter.to_observations(&[record(1, vec![]), second]);
    let ids: Vec<&str> = observations.iter().map(|o| o.observation_id.as_str()).collect();
    assert_eq!(ids, ["b-1", "b-2"]);
    assert_eq!(observations[1].prompt_id, "p-9");
}

#[test]
fn adjusted_weight_applies_reinforcement_and_decay() {
    let adapter = LegacyAdapter::default();
    let rec = record(4, vec![]);
    let abw = adapter.adjusted_weight(&rec, 20 * DAY).unwrap();
    let expected = 0.9 * (1.0 + 4.0 * 0.01) * (-0.05f64 * 10.0).exp();
    assert!((abw - expected).abs() < 1e-9);
}

#[test]
fn adjusted_weight_at_last_seen_has_no_decay() {
    let adapter = LegacyAdapter::default();
    let rec = record(0, vec![]);
    let abw = adapter.adjusted_weight(&rec, rec.last_seen).unwrap();
    assert!((abw - 0.9).abs() < 1e-9);
}
