//! Display label, display name, and archetype selection.
//!
//! Generation is cosmetic. The selector never returns an error: an
//! unavailable generator, a failed call, or an unusable reply all resolve to
//! a deterministic fallback and a `warn!` line.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cbie_core::config::LabelingConfig;
use cbie_core::constants::UNKNOWN_ARCHETYPE;
use cbie_core::models::{CompletionRequest, Tier};
use cbie_core::traits::ITextGenerator;
use tracing::{debug, warn};

use crate::cleanup::{clean_generated, title_case, word_count};
use crate::prompts;

/// Generated vs fallback counts over the selector's lifetime.
pub struct LabelStats {
    generated: AtomicUsize,
    fallback: AtomicUsize,
}

impl LabelStats {
    pub fn new() -> Self {
        Self {
            generated: AtomicUsize::new(0),
            fallback: AtomicUsize::new(0),
        }
    }

    fn record_generated(&self) {
        self.generated.fetch_add(1, Ordering::Relaxed);
    }

    fn record_fallback(&self) {
        self.fallback.fetch_add(1, Ordering::Relaxed);
    }

    pub fn generated_count(&self) -> usize {
        self.generated.load(Ordering::Relaxed)
    }

    pub fn fallback_count(&self) -> usize {
        self.fallback.load(Ordering::Relaxed)
    }

    /// Fraction of generation attempts that produced usable text.
    pub fn generation_rate(&self) -> f64 {
        let g = self.generated_count() as f64;
        let total = g + self.fallback_count() as f64;
        if total < f64::EPSILON {
            0.0
        } else {
            g / total
        }
    }
}

impl Default for LabelStats {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LabelSelector {
    generator: Arc<dyn ITextGenerator>,
    config: LabelingConfig,
    stats: LabelStats,
}

impl LabelSelector {
    pub fn new(generator: Arc<dyn ITextGenerator>, config: LabelingConfig) -> Self {
        Self {
            generator,
            config,
            stats: LabelStats::new(),
        }
    }

    pub fn stats(&self) -> &LabelStats {
        &self.stats
    }

    /// Concise label for a cluster from its member wordings (duplicates allowed).
    pub fn display_label(&self, wordings: &[String]) -> String {
        if wordings.len() == 1 {
            return wordings[0].clone();
        }
        let distinct = dedup(wordings);
        match distinct.as_slice() {
            [] => return String::new(),
            [only] => return (*only).to_string(),
            _ => {}
        }

        let fallback = longest(&distinct);
        let samples: Vec<&str> = distinct
            .iter()
            .take(self.config.max_label_samples.max(1))
            .copied()
            .collect();
        let request = CompletionRequest {
            system_prompt: prompts::LABEL_SYSTEM_PROMPT.to_string(),
            user_prompt: prompts::label_prompt(&samples, self.config.max_label_words),
            max_tokens: self.config.label_max_tokens,
            temperature: self.config.temperature,
        };

        self.generate("label", &request, self.config.max_label_words)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Longer descriptive name; falls back to the first wording, title-cased.
    pub fn display_name(&self, wordings: &[String], cluster_size: usize, tier: Tier) -> String {
        let distinct = dedup(wordings);
        let Some(first) = distinct.first() else {
            return String::new();
        };
        let fallback = title_case(first);
        if distinct.len() == 1 {
            return fallback;
        }

        let samples: Vec<&str> = distinct
            .iter()
            .take(self.config.max_name_samples.max(1))
            .copied()
            .collect();
        let request = CompletionRequest {
            system_prompt: prompts::NAME_SYSTEM_PROMPT.to_string(),
            user_prompt: prompts::name_prompt(&samples, cluster_size, tier, self.config.max_name_words),
            max_tokens: self.config.name_max_tokens,
            temperature: self.config.temperature,
        };

        self.generate("name", &request, self.config.max_name_words)
            .unwrap_or(fallback)
    }

    /// One archetype for a whole profile from its non-NOISE labels.
    pub fn archetype(&self, labels: &[String]) -> String {
        let distinct = dedup(labels);
        if distinct.is_empty() {
            debug!("no labels to derive an archetype from");
            return UNKNOWN_ARCHETYPE.to_string();
        }

        let request = CompletionRequest {
            system_prompt: prompts::ARCHETYPE_SYSTEM_PROMPT.to_string(),
            user_prompt: prompts::archetype_prompt(&distinct),
            max_tokens: self.config.archetype_max_tokens,
            temperature: self.config.temperature,
        };

        // The archetype has no length limit beyond max_tokens.
        self.generate("archetype", &request, usize::MAX)
            .unwrap_or_else(|| UNKNOWN_ARCHETYPE.to_string())
    }

    /// Call the generator and clean the reply. `None` means "use the fallback".
    fn generate(&self, kind: &str, request: &CompletionRequest, max_words: usize) -> Option<String> {
        if !self.generator.is_available() {
            warn!(kind, generator = self.generator.name(), "generator unavailable, using fallback");
            self.stats.record_fallback();
            return None;
        }

        let raw = match self.generator.complete(request) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(kind, generator = self.generator.name(), error = %e, "generation failed, using fallback");
                self.stats.record_fallback();
                return None;
            }
        };

        let cleaned = clean_generated(&raw);
        if cleaned.is_empty() {
            warn!(kind, "generator returned empty text, using fallback");
            self.stats.record_fallback();
            return None;
        }
        let words = word_count(&cleaned);
        if words > max_words {
            warn!(kind, words, max_words, "generated text too long, using fallback");
            self.stats.record_fallback();
            return None;
        }

        debug!(kind, text = %cleaned, "generated");
        self.stats.record_generated();
        Some(cleaned)
    }
}

/// Trimmed, non-empty texts in first-seen order without duplicates.
fn dedup(texts: &[String]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    texts
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty() && seen.insert(*t))
        .collect()
}

/// Longest text by character count; the first one wins ties.
fn longest<'a>(texts: &[&'a str]) -> &'a str {
    texts
        .iter()
        .copied()
        .fold("", |best, t| if t.chars().count() > best.chars().count() { t } else { best })
}
