pub mod embedding;
pub mod generation;
pub mod storage;

pub use embedding::IEmbeddingProvider;
pub use generation::ITextGenerator;
pub use storage::{IDocumentStore, IVectorStore};
