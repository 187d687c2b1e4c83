//! Lock-free in-memory stores.

mod document_store;
mod vector_store;

pub use document_store::InMemoryDocumentStore;
pub use vector_store::InMemoryVectorStore;
