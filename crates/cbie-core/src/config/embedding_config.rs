use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding collaborator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "api" or "tfidf".
    pub provider: String,
    /// Model name sent to the API provider.
    pub model: String,
    /// Embeddings endpoint for the API provider.
    pub endpoint: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Fixed embedding dimensionality for this deployment.
    pub dimensions: usize,
    /// Texts per embedding request.
    pub batch_size: usize,
    /// L1 cache max entries (0 disables caching).
    pub cache_size: u64,
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            endpoint: defaults::DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
            timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
