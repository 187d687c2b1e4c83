//! # cbie-embeddings
//!
//! Embedding collaborator implementations: an OpenAI-compatible HTTP provider,
//! a deterministic TF-IDF hashing fallback, order-preserving batching, and a
//! moka-backed L1 cache keyed by blake3 text hashes.

pub mod batching;
pub mod cache;
pub mod providers;

pub use batching::embed_in_batches;
pub use cache::CachedEmbedder;
pub use providers::{create_provider, ApiProvider, TfIdfFallback};
