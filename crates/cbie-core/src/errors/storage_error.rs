/// Storage collaborator errors. Always fatal to an analysis run.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("corrupt record {id}: {reason}")]
    CorruptRecord { id: String, reason: String },

    #[error("lock poisoned: {resource}")]
    LockPoisoned { resource: String },
}
