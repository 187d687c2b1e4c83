//! Stub collaborators for pipeline and labeling tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use cbie_core::errors::{CbieResult, EmbeddingError, GenerationError};
use cbie_core::models::CompletionRequest;
use cbie_core::traits::{IEmbeddingProvider, ITextGenerator};

use crate::builders::axis_vector;

/// Embedder with fixed vectors for known texts. Unknown texts land on an
/// axis picked by hashing the text.
pub struct StubEmbedder {
    dims: usize,
    known: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            known: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.known.insert(text.to_string(), vector);
        self
    }

    /// Number of `embed_batch` calls received.
    pub fn batch_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        if let Some(v) = self.known.get(text) {
            return v.clone();
        }
        let axis = text.bytes().fold(7usize, |h, b| h.wrapping_mul(31).wrapping_add(b as usize));
        axis_vector(self.dims, axis, 0.0)
    }
}

impl IEmbeddingProvider for StubEmbedder {
    fn embed(&self, text: &str) -> CbieResult<Vec<f32>> {
        Ok(self.vector_for(text))
    }

    fn embed_batch(&self, texts: &[String]) -> CbieResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Embedder whose every call fails.
pub struct FailingEmbedder;

impl IEmbeddingProvider for FailingEmbedder {
    fn embed(&self, _text: &str) -> CbieResult<Vec<f32>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "stub failure".into(),
        }
        .into())
    }

    fn embed_batch(&self, _texts: &[String]) -> CbieResult<Vec<Vec<f32>>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "stub failure".into(),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        8
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Generator that replays queued responses, then repeats the fallback text.
/// Records every request.
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<String>>,
    fallback: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGenerator {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            fallback: String::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer `text`.
    pub fn always(text: &str) -> Self {
        Self {
            fallback: text.to_string(),
            ..Self::new(&[])
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl ITextGenerator for ScriptedGenerator {
    fn complete(&self, request: &CompletionRequest) -> CbieResult<String> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request.clone());
        }
        let next = self.responses.lock().ok().and_then(|mut q| q.pop_front());
        Ok(next.unwrap_or_else(|| self.fallback.clone()))
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Generator that is unavailable and fails every call. Counts calls.
#[derive(Default)]
pub struct FailingGenerator {
    calls: AtomicUsize,
}

impl FailingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ITextGenerator for FailingGenerator {
    fn complete(&self, _request: &CompletionRequest) -> CbieResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GenerationError::RequestFailed {
            reason: "stub failure".into(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn is_available(&self) -> bool {
        false
    }
}
