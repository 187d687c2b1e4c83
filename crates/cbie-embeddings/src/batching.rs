use cbie_core::errors::{CbieResult, EmbeddingError};
use cbie_core::traits::IEmbeddingProvider;
use tracing::debug;

/// Embed `texts` in chunks of `batch_size`, preserving input order.
///
/// Every returned vector is checked against the provider's dimensionality,
/// and each chunk must come back with exactly one vector per text.
pub fn embed_in_batches(
    provider: &dyn IEmbeddingProvider,
    texts: &[String],
    batch_size: usize,
) -> CbieResult<Vec<Vec<f32>>> {
    if texts.is_empty() {
        return Ok(vec![]);
    }
    if !provider.is_available() {
        return Err(EmbeddingError::ProviderUnavailable {
            provider: provider.name().to_string(),
        }
        .into());
    }

    let dims = provider.dimensions();
    let mut out = Vec::with_capacity(texts.len());
    for (batch_no, chunk) in texts.chunks(batch_size.max(1)).enumerate() {
        let vectors = provider.embed_batch(chunk)?;
        if vectors.len() != chunk.len() {
            return Err(EmbeddingError::CountMismatch {
                sent: chunk.len(),
                received: vectors.len(),
            }
            .into());
        }
        if let Some(bad) = vectors.iter().find(|v| v.len() != dims) {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dims,
                actual: bad.len(),
            }
            .into());
        }
        debug!(batch = batch_no, size = chunk.len(), "embedded batch");
        out.extend(vectors);
    }
    Ok(out)
}
