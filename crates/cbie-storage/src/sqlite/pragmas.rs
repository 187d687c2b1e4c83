//! PRAGMA configuration applied to file-backed connections.

use cbie_core::errors::CbieResult;
use rusqlite::Connection;

use crate::to_storage_err;

/// WAL journal, NORMAL sync, foreign keys on, and the configured busy timeout.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> CbieResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))
}
