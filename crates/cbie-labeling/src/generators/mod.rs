//! Text-generation collaborators.

pub mod chat_completions;
pub mod noop;

pub use chat_completions::ChatCompletionsClient;
pub use noop::NoOpGenerator;

use std::sync::Arc;

use cbie_core::config::GenerationConfig;
use cbie_core::errors::CbieResult;
use cbie_core::traits::ITextGenerator;
use tracing::{info, warn};

/// Build the configured generator. Missing keys and unknown providers yield
/// the no-op generator, so labels fall back deterministically.
pub fn create_generator(config: &GenerationConfig) -> CbieResult<Arc<dyn ITextGenerator>> {
    match config.provider.as_str() {
        "api" => match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => {
                info!(provider = "api", model = %config.model, "text generator configured");
                Ok(Arc::new(ChatCompletionsClient::new(config, key)?))
            }
            _ => {
                warn!(env = %config.api_key_env, "generation API configured but no key set, labels use fallbacks");
                Ok(Arc::new(NoOpGenerator))
            }
        },
        "none" => Ok(Arc::new(NoOpGenerator)),
        other => {
            warn!(provider = other, "unknown generation provider, labels use fallbacks");
            Ok(Arc::new(NoOpGenerator))
        }
    }
}
