use cbie_core::constants::USER_ID_KEY;
use cbie_core::errors::CbieResult;
use cbie_core::models::{MetadataFilter, VectorRecord};
use cbie_core::traits::IVectorStore;
use dashmap::DashMap;
use serde_json::Value;

use crate::similarity;

/// Records keyed by `(user_id, record id)`.
#[derive(Default)]
pub struct InMemoryVectorStore {
    records: DashMap<(String, String), VectorRecord>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matching(&self, filter: &MetadataFilter) -> Vec<VectorRecord> {
        let mut out: Vec<VectorRecord> = self
            .records
            .iter()
            .filter(|r| filter.matches(&r.metadata))
            .map(|r| r.clone())
            .collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }
}

impl IVectorStore for InMemoryVectorStore {
    fn upsert(&self, user_id: &str, record: &VectorRecord) -> CbieResult<()> {
        let mut record = record.clone();
        record
            .metadata
            .insert(USER_ID_KEY.to_string(), Value::String(user_id.to_string()));
        self.records
            .insert((user_id.to_string(), record.id.clone()), record);
        Ok(())
    }

    fn query_by_metadata(&self, filter: &MetadataFilter) -> CbieResult<Vec<VectorRecord>> {
        Ok(self.matching(filter))
    }

    fn delete_by_metadata(&self, filter: &MetadataFilter) -> CbieResult<usize> {
        let before = self.records.len();
        self.records.retain(|_, r| !filter.matches(&r.metadata));
        Ok(before.saturating_sub(self.records.len()))
    }

    fn search(
        &self,
        query: &[f32],
        filter: &MetadataFilter,
        limit: usize,
    ) -> CbieResult<Vec<(VectorRecord, f64)>> {
        Ok(similarity::rank(query, self.matching(filter), limit))
    }
}
