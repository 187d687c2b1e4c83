//! Configuration, loaded once at startup and treated as immutable afterwards.

pub mod clustering_config;
pub mod defaults;
pub mod embedding_config;
pub mod generation_config;
pub mod labeling_config;
pub mod observability_config;
pub mod scoring_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use clustering_config::ClusteringConfig;
pub use embedding_config::EmbeddingConfig;
pub use generation_config::GenerationConfig;
pub use labeling_config::LabelingConfig;
pub use observability_config::ObservabilityConfig;
pub use scoring_config::ScoringConfig;
pub use storage_config::StorageConfig;

use crate::errors::{CbieError, CbieResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CbieConfig {
    pub scoring: ScoringConfig,
    pub clustering: ClusteringConfig,
    pub labeling: LabelingConfig,
    pub embedding: EmbeddingConfig,
    pub generation: GenerationConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl CbieConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml(toml_str: &str) -> CbieResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| CbieError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_file(path: &Path) -> CbieResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CbieError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> CbieResult<()> {
        self.scoring.validate()?;
        self.clustering.validate()?;
        if self.embedding.batch_size == 0 {
            return Err(CbieError::config("embedding.batch_size must be >= 1"));
        }
        if self.embedding.dimensions == 0 {
            return Err(CbieError::config("embedding.dimensions must be >= 1"));
        }
        Ok(())
    }
}
