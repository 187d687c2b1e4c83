//! Phase 2: embed observations that arrived without a vector.

use cbie_core::errors::CbieResult;
use cbie_core::models::Observation;
use cbie_core::traits::IEmbeddingProvider;
use cbie_embeddings::embed_in_batches;

/// Fill every missing or empty embedding, in batches. Returns the indices
/// that were filled. Provider failures fail the run.
pub fn fill_missing_embeddings(
    observations: &mut [Observation],
    provider: &dyn IEmbeddingProvider,
    batch_size: usize,
) -> CbieResult<Vec<usize>> {
    let missing: Vec<usize> = observations
        .iter()
        .enumerate()
        .filter(|(_, o)| o.embedding.as_ref().map_or(true, Vec::is_empty))
        .map(|(i, _)| i)
        .collect();
    if missing.is_empty() {
        return Ok(missing);
    }

    let span = cbie_observability::embedding_span!(provider.name(), missing.len());
    let _guard = span.enter();

    let texts: Vec<String> = missing
        .iter()
        .map(|&i| observations[i].text.clone())
        .collect();
    let vectors = embed_in_batches(provider, &texts, batch_size)?;
    for (&i, vector) in missing.iter().zip(vectors) {
        observations[i].embedding = Some(vector);
    }
    Ok(missing)
}
