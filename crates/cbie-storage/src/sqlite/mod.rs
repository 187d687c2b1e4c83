//! SQLite-backed document and vector store.
//!
//! One connection behind a mutex; the traits are synchronous and every
//! operation is a short statement or transaction.

mod blob;
mod documents;
pub mod migrations;
mod pragmas;
mod vectors;

pub use blob::{decode_vector, encode_vector};

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use cbie_core::config::StorageConfig;
use cbie_core::errors::{CbieResult, StorageError};
use rusqlite::Connection;
use tracing::info;

use crate::to_storage_err;

pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and run pending migrations.
    pub fn open(path: &Path, config: &StorageConfig) -> CbieResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn, config.busy_timeout_ms)?;
        migrations::run_migrations(&conn)?;
        info!(path = %path.display(), "sqlite store opened");
        Ok(Self {
            conn: Mutex::new(conn),
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open the database named by `config.db_path`.
    pub fn from_config(config: &StorageConfig) -> CbieResult<Self> {
        Self::open(Path::new(&config.db_path), config)
    }

    /// Open a private in-memory database (for testing).
    pub fn open_in_memory() -> CbieResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path: None,
        })
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    pub fn schema_version(&self) -> CbieResult<u32> {
        self.with_conn(migrations::current_version)
    }

    /// Run a closure with the locked connection.
    pub(crate) fn with_conn<F, T>(&self, f: F) -> CbieResult<T>
    where
        F: FnOnce(&Connection) -> CbieResult<T>,
    {
        let guard = self.lock()?;
        f(&guard)
    }

    /// Run a closure inside a transaction; commits on `Ok`.
    pub(crate) fn with_tx<F, T>(&self, f: F) -> CbieResult<T>
    where
        F: FnOnce(&rusqlite::Transaction<'_>) -> CbieResult<T>,
    {
        let mut guard = self.lock()?;
        let tx = guard
            .transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;
        let out = f(&tx)?;
        tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
        Ok(out)
    }

    fn lock(&self) -> CbieResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            StorageError::LockPoisoned {
                resource: "sqlite connection".to_string(),
            }
            .into()
        })
    }
}
