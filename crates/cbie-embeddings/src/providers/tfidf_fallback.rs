//! TF-IDF hashing fallback provider.
//!
//! Deterministic dense vectors from hashed term frequencies. Works offline,
//! so tests and air-gapped deployments always have an embedder.

use std::collections::HashMap;

use cbie_core::errors::CbieResult;
use cbie_core::traits::IEmbeddingProvider;

pub struct TfIdfFallback {
    dimensions: usize,
}

impl TfIdfFallback {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// FNV-1a bucket for a term.
    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    /// Lowercase alphanumeric terms of two or more characters.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|s| s.chars().count() >= 2)
            .map(str::to_lowercase)
            .collect()
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        for (term, count) in &tf {
            // Longer terms are rarer; short ones are mostly stopwords.
            let idf = 1.0 + (term.len() as f32).ln();
            vec[Self::bucket(term, self.dimensions)] += count / total * idf;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for TfIdfFallback {
    fn embed(&self, text: &str) -> CbieResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> CbieResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "tfidf-fallback"
    }

    fn is_available(&self) -> bool {
        true
    }
}
