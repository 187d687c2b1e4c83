//! The same behavioral contract, run against the in-memory and SQLite stores.

use chrono::{TimeZone, Utc};
use serde_json::{json, Map};

use cbie_core::config::StorageConfig;
use cbie_core::models::{
    BehaviorProfile, LegacyBehaviorRecord, MetadataFilter, Observation, ProfileStatistics, Prompt,
    VectorRecord,
};
use cbie_core::traits::{IDocumentStore, IVectorStore};
use cbie_storage::{InMemoryDocumentStore, InMemoryVectorStore, SqliteStore};

fn profile(user: &str, archetype: Option<&str>) -> BehaviorProfile {
    BehaviorProfile {
        user_id: user.to_string(),
        generated_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        clusters: vec![],
        archetype: archetype.map(str::to_string),
        statistics: ProfileStatistics {
            total_observations: 3,
            noise_observations: 3,
            ..ProfileStatistics::default()
        },
    }
}

fn legacy(id: &str, user: &str) -> LegacyBehaviorRecord {
    LegacyBehaviorRecord {
        behavior_id: id.to_string(),
        behavior_text: "prefers diagrams".to_string(),
        credibility: 0.9,
        clarity_score: 0.8,
        extraction_confidence: 0.7,
        reinforcement_count: 4,
        decay_rate: 0.01,
        created_at: 1_690_000_000,
        last_seen: 1_699_000_000,
        prompt_history_ids: vec!["p1".into()],
        user_id: Some(user.to_string()),
        session_id: None,
    }
}

fn check_documents(store: &dyn IDocumentStore) {
    store.put_prompt(&Prompt::new("p2", "second", 200).with_user("u1")).unwrap();
    store.put_prompt(&Prompt::new("p1", "first", 100).with_user("u1")).unwrap();
    store.put_prompt(&Prompt::new("p3", "other user", 150).with_user("u2")).unwrap();

    let prompts = store.prompts_for_user("u1").unwrap();
    let ids: Vec<&str> = prompts.iter().map(|p| p.prompt_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
    assert_eq!(store.get_prompt("p3").unwrap().unwrap().prompt_text, "other user");
    assert!(store.get_prompt("missing").unwrap().is_none());

    assert!(store.get_profile("u1").unwrap().is_none());
    store.put_profile(&profile("u1", None)).unwrap();
    store.put_profile(&profile("u1", Some("Visual Learner"))).unwrap();
    let stored = store.get_profile("u1").unwrap().unwrap();
    assert_eq!(stored.archetype.as_deref(), Some("Visual Learner"));
    assert_eq!(stored.statistics.total_observations, 3);

    store.put_legacy_behavior(&legacy("b2", "u1")).unwrap();
    store.put_legacy_behavior(&legacy("b1", "u1")).unwrap();
    store.put_legacy_behavior(&legacy("b3", "u2")).unwrap();
    let records = store.legacy_behaviors_for_user("u1").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].behavior_id, "b1");
    assert_eq!(store.get_legacy_behavior("b3").unwrap().unwrap().reinforcement_count, 4);
}

fn record(id: &str, vector: Vec<f32>, kind: &str) -> VectorRecord {
    let mut metadata = Map::new();
    metadata.insert("kind".into(), json!(kind));
    VectorRecord::new(id, vector, metadata)
}

fn check_vectors(store: &dyn IVectorStore) {
    store.upsert("u1", &record("a", vec![1.0, 0.0], "x")).unwrap();
    store
        .upsert_batch(
            "u1",
            &[record("b", vec![0.9, 0.1], "y"), record("c", vec![0.0, 1.0], "x")],
        )
        .unwrap();
    store.upsert("u2", &record("a", vec![0.5, 0.5], "x")).unwrap();

    let mine = store.query_by_metadata(&MetadataFilter::for_user("u1")).unwrap();
    assert_eq!(mine.len(), 3);
    assert!(mine.iter().all(|r| r.metadata["user_id"] == json!("u1")));

    let xs = store
        .query_by_metadata(&MetadataFilter::for_user("u1").eq("kind", "x"))
        .unwrap();
    let ids: Vec<&str> = xs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);

    let everyone = store.query_by_metadata(&MetadataFilter::new()).unwrap();
    assert_eq!(everyone.len(), 4);

    // Upsert replaces.
    store.upsert("u1", &record("a", vec![0.0, 2.0], "x")).unwrap();
    let hits = store
        .search(&[0.0, 1.0], &MetadataFilter::for_user("u1"), 2)
        .unwrap();
    assert_eq!(hits.len(), 2);
    assert!((hits[0].1 - 1.0).abs() < 1e-6);
    assert_eq!(hits[0].0.id, "a");
    assert_eq!(hits[1].0.id, "c");

    let removed = store
        .delete_by_metadata(&MetadataFilter::for_user("u1").eq("kind", "x"))
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(store.query_by_metadata(&MetadataFilter::new()).unwrap().len(), 2);
}

#[test]
fn in_memory_document_store_contract() {
    check_documents(&InMemoryDocumentStore::new());
}

#[test]
fn in_memory_vector_store_contract() {
    check_vectors(&InMemoryVectorStore::new());
}

#[test]
fn sqlite_document_store_contract() {
    check_documents(&SqliteStore::open_in_memory().unwrap());
}

#[test]
fn sqlite_vector_store_contract() {
    check_vectors(&SqliteStore::open_in_memory().unwrap());
}

#[test]
fn sqlite_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cbie.db");
    let config = StorageConfig::default();

    {
        let store = SqliteStore::open(&path, &config).unwrap();
        assert_eq!(store.schema_version().unwrap(), 2);
        let obs = Observation::new("o1", "wants tables", 1_700_000_000, "p1").with_embedding(vec![0.25, -1.5, 3.0]);
        let rec = VectorRecord::new("o1", vec![0.25, -1.5, 3.0], obs.to_metadata());
        store.upsert("u1", &rec).unwrap();
        store.put_profile(&profile("u1", Some("Tinkerer"))).unwrap();
    }

    let store = SqliteStore::open(&path, &config).unwrap();
    assert_eq!(store.schema_version().unwrap(), 2);
    let records = store.query_by_metadata(&MetadataFilter::for_user("u1")).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].vector, vec![0.25, -1.5, 3.0]);

    let restored = Observation::from_vector_record(&records[0], 0, 0.01);
    assert_eq!(restored.text, "wants tables");
    assert_eq!(restored.prompt_id, "p1");
    assert_eq!(restored.user_id.as_deref(), Some("u1"));
    assert_eq!(
        store.get_profile("u1").unwrap().unwrap().archetype.as_deref(),
        Some("Tinkerer")
    );
}
