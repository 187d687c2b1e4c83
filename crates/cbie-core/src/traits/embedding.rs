use std::sync::Arc;

use crate::errors::CbieResult;

/// Text-embedding provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> CbieResult<Vec<f32>>;

    /// Embed a batch of texts. Output order matches input order.
    fn embed_batch(&self, texts: &[String]) -> CbieResult<Vec<Vec<f32>>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}

impl<T: IEmbeddingProvider + ?Sized> IEmbeddingProvider for Arc<T> {
    fn embed(&self, text: &str) -> CbieResult<Vec<f32>> {
        (**self).embed(text)
    }

    fn embed_batch(&self, texts: &[String]) -> CbieResult<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }

    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}
