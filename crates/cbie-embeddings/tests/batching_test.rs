use cbie_core::errors::{CbieError, EmbeddingError};
use cbie_core::traits::IEmbeddingProvider;
use cbie_embeddings::{embed_in_batches, CachedEmbedder, TfIdfFallback};
use test_fixtures::{axis_vector, FailingEmbedder, StubEmbedder};

fn texts(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("observation text {i}")).collect()
}

#[test]
fn batches_preserve_order_and_chunking() {
    let stub = StubEmbedder::new(4).with("observation text 3", axis_vector(4, 2, 0.5));
    let out = embed_in_batches(&stub, &texts(7), 3).unwrap();
    assert_eq!(out.len(), 7);
    assert_eq!(stub.batch_calls(), 3);
    assert_eq!(out[3], axis_vector(4, 2, 0.5));
}

#[test]
fn empty_input_makes_no_calls() {
    let stub = StubEmbedder::new(4);
    assert!(embed_in_batches(&stub, &[], 10).unwrap().is_empty());
    assert_eq!(stub.batch_calls(), 0);
}

#[test]
fn unavailable_provider_is_an_error() {
    let err = embed_in_batches(&FailingEmbedder, &texts(2), 10).unwrap_err();
    assert!(matches!(err, CbieError::EmbeddingError(_)));
}

#[test]
fn wrong_width_from_provider_is_rejected() {
    // Provider claims 4 dimensions but returns an 8-wide vector for this text.
    let stub = StubEmbedder::new(4).with("observation text 0", vec![0.0; 8]);
    let err = embed_in_batches(&stub, &texts(2), 10).unwrap_err();
    assert!(matches!(
        err,
        CbieError::EmbeddingError(EmbeddingError::DimensionMismatch { expected: 4, actual: 8 })
    ));
}

#[test]
fn cache_in_front_of_stub_skips_repeat_batches() {
    let cached = CachedEmbedder::new(StubEmbedder::new(4), 100);
    let first = embed_in_batches(&cached, &texts(5), 100).unwrap();
    let second = embed_in_batches(&cached, &texts(5), 100).unwrap();
    assert_eq!(first, second);
    assert!(cached.cached("observation text 4").is_some());
}

#[test]
fn tfidf_batches_are_deterministic() {
    let provider = TfIdfFallback::new(32);
    let a = embed_in_batches(&provider, &texts(4), 2).unwrap();
    let b = embed_in_batches(&provider, &texts(4), 3).unwrap();
    assert_eq!(a, b);
    assert!(a.iter().all(|v| v.len() == provider.dimensions()));
}
