//! Provider registry.
//!
//! `api` needs a key in the configured environment variable; without one the
//! registry falls back to TF-IDF, which is always available.

pub mod api_provider;
pub mod tfidf_fallback;

pub use api_provider::ApiProvider;
pub use tfidf_fallback::TfIdfFallback;

use cbie_core::config::EmbeddingConfig;
use cbie_core::errors::CbieResult;
use cbie_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

use crate::cache::CachedEmbedder;

/// Create the configured provider, wrapped in the L1 cache when enabled.
pub fn create_provider(config: &EmbeddingConfig) -> CbieResult<Box<dyn IEmbeddingProvider>> {
    let provider: Box<dyn IEmbeddingProvider> = match config.provider.as_str() {
        "api" => match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => {
                info!(provider = "api", model = %config.model, "embedding provider configured");
                Box::new(ApiProvider::new(config, key)?)
            }
            _ => {
                warn!(
                    env = %config.api_key_env,
                    "API provider configured but no key set, using TF-IDF fallback"
                );
                Box::new(TfIdfFallback::new(config.dimensions))
            }
        },
        "tfidf" => {
            info!(provider = "tfidf", "using TF-IDF embedding provider");
            Box::new(TfIdfFallback::new(config.dimensions))
        }
        other => {
            warn!(provider = other, "unknown provider, using TF-IDF fallback");
            Box::new(TfIdfFallback::new(config.dimensions))
        }
    };

    if config.cache_size == 0 {
        return Ok(provider);
    }
    Ok(Box::new(CachedEmbedder::new(std::sync::Arc::<dyn IEmbeddingProvider>::from(provider), config.cache_size)))
}
