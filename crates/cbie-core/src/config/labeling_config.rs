use serde::{Deserialize, Serialize};

use super::defaults;

/// Label, name, and archetype generation limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelingConfig {
    /// Generated labels longer than this fall back to the longest member text.
    pub max_label_words: usize,
    /// Distinct wordings sent to the generator for a label.
    pub max_label_samples: usize,
    /// Generated names longer than this fall back to the title-cased first wording.
    pub max_name_words: usize,
    /// Wordings sent to the generator for a name.
    pub max_name_samples: usize,
    pub label_max_tokens: u32,
    pub name_max_tokens: u32,
    pub archetype_max_tokens: u32,
    pub temperature: f32,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            max_label_words: defaults::DEFAULT_MAX_LABEL_WORDS,
            max_label_samples: defaults::DEFAULT_MAX_LABEL_SAMPLES,
            max_name_words: defaults::DEFAULT_MAX_NAME_WORDS,
            max_name_samples: defaults::DEFAULT_MAX_NAME_SAMPLES,
            label_max_tokens: defaults::DEFAULT_LABEL_MAX_TOKENS,
            name_max_tokens: defaults::DEFAULT_NAME_MAX_TOKENS,
            archetype_max_tokens: defaults::DEFAULT_ARCHETYPE_MAX_TOKENS,
            temperature: defaults::DEFAULT_LABEL_TEMPERATURE,
        }
    }
}
