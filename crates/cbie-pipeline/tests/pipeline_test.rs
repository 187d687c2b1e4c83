use std::sync::Arc;

use cbie_core::config::{CbieConfig, StorageConfig};
use cbie_core::errors::CbieError;
use cbie_core::models::{MetadataFilter, Observation, Tier, VectorRecord};
use cbie_core::traits::{IDocumentStore, IEmbeddingProvider, ITextGenerator, IVectorStore};
use cbie_pipeline::{AnalysisOptions, ClusterAnalysisPipeline};
use cbie_storage::{InMemoryDocumentStore, InMemoryVectorStore, SqliteStore};
use test_fixtures::builders::prompts_for;
use test_fixtures::{axis_vector, load_scenario, FailingEmbedder, FailingGenerator, ObservationBuilder, ScriptedGenerator, StubEmbedder};

const NOW: i64 = 1_700_000_000;
const DAY: i64 = 86_400;
const DIMS: usize = 8;

struct Harness {
    pipeline: ClusterAnalysisPipeline,
    vectors: Arc<InMemoryVectorStore>,
    documents: Arc<InMemoryDocumentStore>,
}

fn harness_with(embedder: Arc<dyn IEmbeddingProvider>, generator: Arc<dyn ITextGenerator>) -> Harness {
    let vectors = Arc::new(InMemoryVectorStore::new());
    let documents = Arc::new(InMemoryDocumentStore::new());
    let pipeline = ClusterAnalysisPipeline::new(
        CbieConfig::default(),
        embedder,
        vectors.clone(),
        documents.clone(),
        generator,
    )
    .unwrap();
    Harness {
        pipeline,
        vectors,
        documents,
    }
}

fn harness() -> Harness {
    harness_with(Arc::new(StubEmbedder::new(DIMS)), Arc::new(FailingGenerator::new()))
}

fn tight_triple() -> Vec<Observation> {
    vec![
        ObservationBuilder::new("a1", "asks for code examples", NOW - 3_600)
            .embedding(axis_vector(DIMS, 0, 0.0))
            .build(),
        ObservationBuilder::new("a2", "wants runnable code samples", NOW - 7_200)
            .embedding(axis_vector(DIMS, 0, 0.01))
            .build(),
        ObservationBuilder::new("a3", "requests example snippets", NOW - DAY / 2)
            .embedding(axis_vector(DIMS, 0, 0.02))
            .build(),
    ]
}

#[test]
fn tight_recent_triple_is_one_primary_cluster() {
    let h = harness();
    let obs = tight_triple();
    let prompts = prompts_for(&obs);
    let profile = h
        .pipeline
        .analyze_observations("user-1", obs, prompts, &AnalysisOptions::default().at(NOW))
        .unwrap();

    assert_eq!(profile.statistics.clusters_formed, 1);
    let cluster = &profile.clusters[0];
    assert_eq!(cluster.cluster_size, 3);
    assert!(cluster.raw_strength() >= 0.8, "raw strength {}", cluster.raw_strength());
    assert!(cluster.strength < 1.0);
    assert_eq!(cluster.tier, Tier::Primary);
    assert_eq!(cluster.prompt_ids.len(), 3);
    assert_eq!(cluster.first_seen, NOW - DAY / 2);
    assert_eq!(cluster.last_seen, NOW - 3_600);
    // Unavailable generator: longest wording wins.
    assert_eq!(cluster.label, "wants runnable code samples");
    assert_eq!(cluster.name, "Asks For Code Examples");
    assert_eq!(profile.archetype.as_deref(), Some("Unknown"));
}

#[test]
fn distant_pair_forms_no_cluster() {
    let h = harness();
    let obs = vec![
        ObservationBuilder::new("b1", "likes tables", NOW)
            .embedding(axis_vector(DIMS, 0, 0.0))
            .build(),
        ObservationBuilder::new("b2", "writes in french", NOW)
            .embedding(axis_vector(DIMS, 3, 0.0))
            .build(),
    ];
    let profile = h
        .pipeline
        .analyze_observations("user-1", obs, vec![], &AnalysisOptions::default().at(NOW))
        .unwrap();

    assert_eq!(profile.statistics.clusters_formed, 0);
    assert_eq!(profile.statistics.noise_observations, 2);
    assert_eq!(profile.statistics.total_observations, 2);
    assert!(profile.clusters.is_empty());
    assert_eq!(profile.archetype, None);
}

#[test]
fn noise_only_profile_has_no_archetype() {
    let generator = Arc::new(ScriptedGenerator::always("Example Seeker"));
    let h = harness_with(Arc::new(StubEmbedder::new(DIMS)), generator.clone());
    let profile = h
        .pipeline
        .analyze_observations(
            "user-1",
            tight_triple(),
            vec![],
            &AnalysisOptions::default().at(NOW + 200 * DAY),
        )
        .unwrap();

    assert_eq!(profile.clusters.len(), 1);
    assert_eq!(profile.clusters[0].tier, Tier::Noise);
    assert_eq!(profile.archetype, None);
    // Label and name only.
    assert_eq!(generator.call_count(), 2);
}

#[test]
fn elapsed_time_alone_demotes_a_cluster() {
    let h = harness();
    let options = AnalysisOptions::default().without_persistence().without_archetype();

    let fresh = h
        .pipeline
        .analyze_observations("user-1", tight_triple(), vec![], &options.clone().at(NOW))
        .unwrap();
    let stale = h
        .pipeline
        .analyze_observations("user-1", tight_triple(), vec![], &options.at(NOW + 200 * DAY))
        .unwrap();

    let (fresh, stale) = (&fresh.clusters[0], &stale.clusters[0]);
    assert!(stale.breakdown.recency_factor < 0.15);
    assert!(stale.strength < fresh.strength);
    assert_eq!(fresh.tier, Tier::Primary);
    assert_eq!(stale.tier, Tier::Noise);
    assert_eq!(stale.confidence, fresh.confidence);
}

#[test]
fn fewer_observations_than_min_cluster_size_is_an_empty_profile() {
    let h = harness();
    let obs = vec![ObservationBuilder::new("solo", "only one", NOW)
        .embedding(axis_vector(DIMS, 0, 0.0))
        .build()];
    let profile = h
        .pipeline
        .analyze_observations("user-1", obs, vec![], &AnalysisOptions::default().at(NOW))
        .unwrap();
    assert_eq!(profile.statistics.clusters_formed, 0);
    assert_eq!(profile.statistics.noise_observations, 1);
}

#[test]
fn missing_embeddings_are_filled_in_batches() {
    let embedder = Arc::new(
        StubEmbedder::new(DIMS)
            .with("short answers please", axis_vector(DIMS, 2, 0.0))
            .with("keep it brief", axis_vector(DIMS, 2, 0.01))
            .with("no long explanations", axis_vector(DIMS, 2, 0.02)),
    );
    let h = harness_with(embedder.clone(), Arc::new(FailingGenerator::new()));
    let obs = vec![
        ObservationBuilder::new("e1", "short answers please", NOW).build(),
        ObservationBuilder::new("e2", "keep it brief", NOW).build(),
        ObservationBuilder::new("e3", "no long explanations", NOW).build(),
    ];

    let profile = h
        .pipeline
        .analyze_observations("user-1", obs, vec![], &AnalysisOptions::default().at(NOW))
        .unwrap();
    assert_eq!(embedder.batch_calls(), 1);
    assert_eq!(profile.clusters.len(), 1);

    // Persisted with embeddings and tagged with the user.
    let stored = h.vectors.query_by_metadata(&MetadataFilter::for_user("user-1")).unwrap();
    assert_eq!(stored.len(), 3);
    assert!(stored.iter().all(|r| r.vector.len() == DIMS));
}

#[test]
fn embedding_failure_fails_the_run() {
    let h = harness_with(Arc::new(FailingEmbedder), Arc::new(FailingGenerator::new()));
    let obs = vec![
        ObservationBuilder::new("f1", "x", NOW).build(),
        ObservationBuilder::new("f2", "y", NOW).build(),
    ];
    let err = h
        .pipeline
        .analyze_observations("user-1", obs, vec![], &AnalysisOptions::default().at(NOW))
        .unwrap_err();
    assert!(matches!(err, CbieError::EmbeddingError(_)));
    assert!(h.documents.get_profile("user-1").unwrap().is_none());
}

#[test]
fn invalid_quality_score_is_rejected() {
    let h = harness();
    let mut obs = tight_triple();
    obs[1].credibility = 0.0;
    let err = h
        .pipeline
        .analyze_observations("user-1", obs, vec![], &AnalysisOptions::default().at(NOW))
        .unwrap_err();
    assert!(matches!(err, CbieError::ScoringError(_)));
}

#[test]
fn analyze_from_storage_without_data_is_not_found() {
    let h = harness();
    let err = h
        .pipeline
        .analyze_from_storage("ghost", &AnalysisOptions::default().at(NOW))
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, CbieError::ObservationsNotFound { .. }));
}

#[test]
fn analyze_from_storage_reads_vectors_and_prompts() {
    let h = harness();
    let obs = tight_triple();
    for p in prompts_for(&obs) {
        let mut p = p;
        p.user_id = Some("user-1".into());
        h.documents.put_prompt(&p).unwrap();
    }
    for o in &obs {
        let rec = VectorRecord::new(o.observation_id.clone(), o.embedding.clone().unwrap(), o.to_metadata());
        h.vectors.upsert("user-1", &rec).unwrap();
    }

    let profile = h
        .pipeline
        .analyze_from_storage("user-1", &AnalysisOptions::default().at(NOW))
        .unwrap();
    assert_eq!(profile.statistics.total_observations, 3);
    assert_eq!(profile.statistics.total_prompts, 3);
    assert!((profile.statistics.time_span_days - (DAY / 2 - 3_600) as f64 / DAY as f64).abs() < 1e-9);
    assert_eq!(profile.clusters[0].tier, Tier::Primary);

    let stored = h.pipeline.get_profile("user-1").unwrap();
    assert_eq!(stored.clusters.len(), 1);
}

#[test]
fn second_run_replaces_the_profile() {
    let h = harness();
    let options = AnalysisOptions::default().at(NOW);
    h.pipeline
        .analyze_observations("user-1", tight_triple(), vec![], &options)
        .unwrap();
    let second = h
        .pipeline
        .analyze_from_storage("user-1", &options.clone().at(NOW + 200 * DAY))
        .unwrap();

    assert_eq!(h.documents.profile_count(), 1);
    let stored = h.pipeline.get_profile("user-1").unwrap();
    assert_eq!(stored.clusters[0].tier, Tier::Noise);
    assert_eq!(stored.generated_at, second.generated_at);
}

#[test]
fn unreadable_previous_profile_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cbie.db");
    let store = Arc::new(SqliteStore::open(&path, &StorageConfig::default()).unwrap());

    let stale = serde_json::json!({ "user_id": "user-1" }).to_string();
    let raw = rusqlite::Connection::open(&path).unwrap();
    raw.execute(
        "INSERT INTO profiles (user_id, generated_at, body) VALUES (?1, ?2, ?3)",
        rusqlite::params!["user-1", "2023-01-01T00:00:00+00:00", stale],
    )
    .unwrap();
    drop(raw);
    assert!(store.get_profile("user-1").is_err());

    let pipeline = ClusterAnalysisPipeline::new(
        CbieConfig::default(),
        Arc::new(StubEmbedder::new(DIMS)),
        store.clone(),
        store.clone(),
        Arc::new(FailingGenerator::new()),
    )
    .unwrap();
    let profile = pipeline
        .analyze_observations("user-1", tight_triple(), vec![], &AnalysisOptions::default().at(NOW))
        .unwrap();

    let stored = store.get_profile("user-1").unwrap().unwrap();
    assert_eq!(stored.user_id, profile.user_id);
    assert_eq!(stored.generated_at, profile.generated_at);
    let labels = |p: &cbie_core::models::BehaviorProfile| -> Vec<String> {
        p.clusters.iter().map(|c| c.label.clone()).collect()
    };
    assert_eq!(stored.clusters.len(), 1);
    assert_eq!(labels(&stored), labels(&profile));
}

#[test]
fn generated_labels_and_archetype_are_used() {
    let generator = Arc::new(ScriptedGenerator::new(&[
        "Code Example Seeker",
        "Prefers Working Code Examples",
        "Hands-On Learner",
    ]));
    let h = harness_with(Arc::new(StubEmbedder::new(DIMS)), generator.clone());
    let profile = h
        .pipeline
        .analyze_observations("user-1", tight_triple(), vec![], &AnalysisOptions::default().at(NOW))
        .unwrap();

    assert_eq!(profile.clusters[0].label, "Code Example Seeker");
    assert_eq!(profile.clusters[0].name, "Prefers Working Code Examples");
    assert_eq!(profile.archetype.as_deref(), Some("Hands-On Learner"));
    assert_eq!(generator.call_count(), 3);
}

#[test]
fn golden_scenarios_match_expectations() {
    for file in ["tight_triple.json", "far_pair.json", "two_patterns.json"] {
        let scenario = load_scenario(file);
        let h = harness();
        let profile = h
            .pipeline
            .analyze_observations(
                &scenario.user_id,
                scenario.observations.clone(),
                scenario.prompts.clone(),
                &AnalysisOptions::default().at(scenario.reference_time),
            )
            .unwrap();

        assert_eq!(
            profile.statistics.clusters_formed, scenario.expected.clusters_formed,
            "{}: clusters",
            scenario.name
        );
        assert_eq!(
            profile.statistics.noise_observations, scenario.expected.noise_observations,
            "{}: noise",
            scenario.name
        );
        let tiers: Vec<Tier> = profile.clusters.iter().map(|c| c.tier).collect();
        assert_eq!(tiers, scenario.expected.tiers, "{}: tiers", scenario.name);
    }
}
