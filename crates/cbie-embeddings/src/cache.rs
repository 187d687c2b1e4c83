//! L1 in-memory embedding cache using moka, keyed by blake3 text hashes.

use std::time::Duration;

use cbie_core::errors::CbieResult;
use cbie_core::traits::IEmbeddingProvider;
use moka::sync::Cache;
use tracing::debug;

/// Provider wrapper that serves repeated texts from memory.
pub struct CachedEmbedder<P> {
    inner: P,
    cache: Cache<String, Vec<f32>>,
}

impl<P: IEmbeddingProvider> CachedEmbedder<P> {
    pub fn new(inner: P, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .time_to_live(Duration::from_secs(86400))
            .build();
        Self { inner, cache }
    }

    pub fn key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn cached(&self, text: &str) -> Option<Vec<f32>> {
        self.cache.get(&Self::key(text))
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl<P: IEmbeddingProvider> IEmbeddingProvider for CachedEmbedder<P> {
    fn embed(&self, text: &str) -> CbieResult<Vec<f32>> {
        let key = Self::key(text);
        if let Some(v) = self.cache.get(&key) {
            return Ok(v);
        }
        let v = self.inner.embed(text)?;
        self.cache.insert(key, v.clone());
        Ok(v)
    }

    /// Only cache misses reach the inner provider, in one batch.
    fn embed_batch(&self, texts: &[String]) -> CbieResult<Vec<Vec<f32>>> {
        let keys: Vec<String> = texts.iter().map(|t| Self::key(t)).collect();
        let mut out: Vec<Option<Vec<f32>>> = keys.iter().map(|k| self.cache.get(k)).collect();

        let miss_idx: Vec<usize> = (0..texts.len()).filter(|&i| out[i].is_none()).collect();
        if !miss_idx.is_empty() {
            let misses: Vec<String> = miss_idx.iter().map(|&i| texts[i].clone()).collect();
            let fresh = self.inner.embed_batch(&misses)?;
            debug!(hits = texts.len() - misses.len(), misses = misses.len(), "embedding cache");
            for (&i, v) in miss_idx.iter().zip(fresh) {
                self.cache.insert(keys[i].clone(), v.clone());
                out[i] = Some(v);
            }
        }

        // Slots still empty mean the inner provider returned too few vectors;
        // leave the count check to the caller.
        Ok(out.into_iter().flatten().collect())
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Counting {
        calls: AtomicUsize,
    }

    impl IEmbeddingProvider for Counting {
        fn embed(&self, text: &str) -> CbieResult<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![text.len() as f32])
        }

        fn embed_batch(&self, texts: &[String]) -> CbieResult<Vec<Vec<f32>>> {
            self.calls.fetch_add(texts.len(), Ordering::SeqCst);
            Ok(texts.iter().map(|t| vec![t.len() as f32]).collect())
        }

        fn dimensions(&self) -> usize {
            1
        }

        fn name(&self) -> &str {
            "counting"
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    fn cached() -> CachedEmbedder<Counting> {
        CachedEmbedder::new(
            Counting {
                calls: AtomicUsize::new(0),
            },
            100,
        )
    }

    #[test]
    fn repeated_text_hits_cache() {
        let c = cached();
        assert_eq!(c.embed("hello").unwrap(), vec![5.0]);
        assert_eq!(c.embed("hello").unwrap(), vec![5.0]);
        assert_eq!(c.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn batch_only_sends_misses_and_keeps_order() {
        let c = cached();
        c.embed("bb").unwrap();
        let texts = vec!["a".to_string(), "bb".to_string(), "cccc".to_string()];
        let out = c.embed_batch(&texts).unwrap();
        assert_eq!(out, vec![vec![1.0], vec![2.0], vec![4.0]]);
        assert_eq!(c.inner.calls.load(Ordering::SeqCst), 3);
        assert!(c.cached("cccc").is_some());
    }

    #[test]
    fn clear_drops_entries() {
        let c = cached();
        c.embed("x").unwrap();
        c.clear();
        assert!(c.cached("x").is_none());
    }
}
