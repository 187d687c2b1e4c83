//! # cbie-storage
//!
//! Collaborator stores for prompts, profiles, legacy behavior records, and
//! observation vectors. The in-memory stores back tests and embedded use;
//! [`SqliteStore`] implements both traits on a single database file.

pub mod memory;
pub mod similarity;
pub mod sqlite;

pub use memory::{InMemoryDocumentStore, InMemoryVectorStore};
pub use sqlite::SqliteStore;

use cbie_core::errors::{CbieError, StorageError};

/// Convert a driver error message into the workspace error type.
pub fn to_storage_err(message: String) -> CbieError {
    CbieError::StorageError(StorageError::SqliteError { message })
}
