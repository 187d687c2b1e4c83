use std::sync::Arc;

use crate::errors::CbieResult;
use crate::models::{BehaviorProfile, LegacyBehaviorRecord, MetadataFilter, Prompt, VectorRecord};

/// Vector store for observation embeddings with metadata filtering.
pub trait IVectorStore: Send + Sync {
    /// Insert or replace a record. The store tags it with `user_id`.
    fn upsert(&self, user_id: &str, record: &VectorRecord) -> CbieResult<()>;

    fn upsert_batch(&self, user_id: &str, records: &[VectorRecord]) -> CbieResult<usize> {
        for record in records {
            self.upsert(user_id, record)?;
        }
        Ok(records.len())
    }

    fn query_by_metadata(&self, filter: &MetadataFilter) -> CbieResult<Vec<VectorRecord>>;

    /// Returns the number of records removed.
    fn delete_by_metadata(&self, filter: &MetadataFilter) -> CbieResult<usize>;

    /// Records matching `filter`, ranked by cosine similarity to `query`, descending.
    fn search(
        &self,
        query: &[f32],
        filter: &MetadataFilter,
        limit: usize,
    ) -> CbieResult<Vec<(VectorRecord, f64)>>;
}

/// Keyed document store for prompts, profiles, and legacy behavior records.
pub trait IDocumentStore: Send + Sync {
    // --- Prompts ---
    fn put_prompt(&self, prompt: &Prompt) -> CbieResult<()>;
    fn get_prompt(&self, prompt_id: &str) -> CbieResult<Option<Prompt>>;
    fn prompts_for_user(&self, user_id: &str) -> CbieResult<Vec<Prompt>>;

    // --- Profiles (one per user, replace on write) ---
    fn put_profile(&self, profile: &BehaviorProfile) -> CbieResult<()>;
    fn get_profile(&self, user_id: &str) -> CbieResult<Option<BehaviorProfile>>;

    // --- Legacy behavior records ---
    fn put_legacy_behavior(&self, record: &LegacyBehaviorRecord) -> CbieResult<()>;
    fn get_legacy_behavior(&self, behavior_id: &str) -> CbieResult<Option<LegacyBehaviorRecord>>;
    fn legacy_behaviors_for_user(&self, user_id: &str) -> CbieResult<Vec<LegacyBehaviorRecord>>;
}

impl<T: IVectorStore + ?Sized> IVectorStore for Arc<T> {
    fn upsert(&self, user_id: &str, record: &VectorRecord) -> CbieResult<()> {
        (**self).upsert(user_id, record)
    }

    fn upsert_batch(&self, user_id: &str, records: &[VectorRecord]) -> CbieResult<usize> {
        (**self).upsert_batch(user_id, records)
    }

    fn query_by_metadata(&self, filter: &MetadataFilter) -> CbieResult<Vec<VectorRecord>> {
        (**self).query_by_metadata(filter)
    }

    fn delete_by_metadata(&self, filter: &MetadataFilter) -> CbieResult<usize> {
        (**self).delete_by_metadata(filter)
    }

    fn search(
        &self,
        query: &[f32],
        filter: &MetadataFilter,
        limit: usize,
    ) -> CbieResult<Vec<(VectorRecord, f64)>> {
        (**self).search(query, filter, limit)
    }
}

impl<T: IDocumentStore + ?Sized> IDocumentStore for Arc<T> {
    fn put_prompt(&self, prompt: &Prompt) -> CbieResult<()> {
        (**self).put_prompt(prompt)
    }

    fn get_prompt(&self, prompt_id: &str) -> CbieResult<Option<Prompt>> {
        (**self).get_prompt(prompt_id)
    }

    fn prompts_for_user(&self, user_id: &str) -> CbieResult<Vec<Prompt>> {
        (**self).prompts_for_user(user_id)
    }

    fn put_profile(&self, profile: &BehaviorProfile) -> CbieResult<()> {
        (**self).put_profile(profile)
    }

    fn get_profile(&self, user_id: &str) -> CbieResult<Option<BehaviorProfile>> {
        (**self).get_profile(user_id)
    }

    fn put_legacy_behavior(&self, record: &LegacyBehaviorRecord) -> CbieResult<()> {
        (**self).put_legacy_behavior(record)
    }

    fn get_legacy_behavior(&self, behavior_id: &str) -> CbieResult<Option<LegacyBehaviorRecord>> {
        (**self).get_legacy_behavior(behavior_id)
    }

    fn legacy_behaviors_for_user(&self, user_id: &str) -> CbieResult<Vec<LegacyBehaviorRecord>> {
        (**self).legacy_behaviors_for_user(user_id)
    }
}
