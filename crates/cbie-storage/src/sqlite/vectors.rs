use cbie_core::constants::USER_ID_KEY;
use cbie_core::errors::{CbieResult, StorageError};
use cbie_core::models::{MetadataFilter, VectorRecord};
use cbie_core::traits::IVectorStore;
use rusqlite::{params, Connection};
use serde_json::{Map, Value};
use tracing::debug;

use super::blob::{decode_vector, encode_vector};
use super::SqliteStore;
use crate::{similarity, to_storage_err};

/// Narrow by the indexed `user_id` column when the filter names a user;
/// every other condition is applied to the decoded metadata.
fn user_condition(filter: &MetadataFilter) -> Option<&str> {
    filter
        .conditions()
        .iter()
        .find(|(key, _)| key == USER_ID_KEY)
        .and_then(|(_, value)| value.as_str())
}

fn load_matching(conn: &Connection, filter: &MetadataFilter) -> CbieResult<Vec<(String, VectorRecord)>> {
    let (sql, args): (&str, Vec<String>) = match user_condition(filter) {
        Some(user) => (
            "SELECT user_id, id, vector, metadata FROM vectors WHERE user_id = ?1 ORDER BY id",
            vec![user.to_string()],
        ),
        None => (
            "SELECT user_id, id, vector, metadata FROM vectors ORDER BY user_id, id",
            vec![],
        ),
    };

    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(args.iter()), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Vec<u8>>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (user_id, id, blob, metadata) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let metadata: Map<String, Value> =
            serde_json::from_str(&metadata).map_err(|e| StorageError::CorruptRecord {
                id: id.clone(),
                reason: e.to_string(),
            })?;
        if !filter.matches(&metadata) {
            continue;
        }
        let vector = decode_vector(&id, &blob)?;
        out.push((user_id, VectorRecord { id, vector, metadata }));
    }
    Ok(out)
}

impl IVectorStore for SqliteStore {
    fn upsert(&self, user_id: &str, record: &VectorRecord) -> CbieResult<()> {
        self.upsert_batch(user_id, std::slice::from_ref(record)).map(|_| ())
    }

    fn upsert_batch(&self, user_id: &str, records: &[VectorRecord]) -> CbieResult<usize> {
        self.with_tx(|tx| {
            let mut stmt = tx
                .prepare(
                    "INSERT OR REPLACE INTO vectors (user_id, id, dimensions, vector, metadata)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
            for record in records {
                let mut metadata = record.metadata.clone();
                metadata.insert(USER_ID_KEY.to_string(), Value::String(user_id.to_string()));
                let metadata = serde_json::to_string(&metadata)?;
                stmt.execute(params![
                    user_id,
                    record.id,
                    record.vector.len() as i64,
                    encode_vector(&record.vector),
                    metadata
                ])
                .map_err(|e| to_storage_err(e.to_string()))?;
            }
            debug!(user_id, count = records.len(), "vectors upserted");
            Ok(records.len())
        })
    }

    fn query_by_metadata(&self, filter: &MetadataFilter) -> CbieResult<Vec<VectorRecord>> {
        self.with_conn(|conn| {
            Ok(load_matching(conn, filter)?
                .into_iter()
                .map(|(_, record)| record)
                .collect())
        })
    }

    fn delete_by_metadata(&self, filter: &MetadataFilter) -> CbieResult<usize> {
        self.with_tx(|tx| {
            let doomed = load_matching(tx, filter)?;
            let mut stmt = tx
                .prepare("DELETE FROM vectors WHERE user_id = ?1 AND id = ?2")
                .map_err(|e| to_storage_err(e.to_string()))?;
            let mut removed = 0;
            for (user_id, record) in &doomed {
                removed += stmt
                    .execute(params![user_id, record.id])
                    .map_err(|e| to_storage_err(e.to_string()))?;
            }
            Ok(removed)
        })
    }

    fn search(
        &self,
        query: &[f32],
        filter: &MetadataFilter,
        limit: usize,
    ) -> CbieResult<Vec<(VectorRecord, f64)>> {
        let candidates = self.query_by_metadata(filter)?;
        Ok(similarity::rank(query, candidates, limit))
    }
}
