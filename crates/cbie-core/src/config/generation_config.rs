use serde::{Deserialize, Serialize};

use super::defaults;

/// Text-generation collaborator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Generator: "api" or "none".
    pub provider: String,
    pub model: String,
    /// Chat-completions endpoint.
    pub endpoint: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_GENERATION_PROVIDER.to_string(),
            model: defaults::DEFAULT_GENERATION_MODEL.to_string(),
            endpoint: defaults::DEFAULT_GENERATION_ENDPOINT.to_string(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
