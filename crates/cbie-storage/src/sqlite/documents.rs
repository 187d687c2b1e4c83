use cbie_core::errors::{CbieResult, StorageError};
use cbie_core::models::{BehaviorProfile, LegacyBehaviorRecord, Prompt};
use cbie_core::traits::IDocumentStore;
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;

use super::SqliteStore;
use crate::to_storage_err;

fn parse_body<T: DeserializeOwned>(id: &str, body: &str) -> CbieResult<T> {
    serde_json::from_str(body).map_err(|e| {
        StorageError::CorruptRecord {
            id: id.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

impl SqliteStore {
    fn get_body(&self, sql: &str, key: &str) -> CbieResult<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(sql, params![key], |row| row.get::<_, String>(0))
                .optional()
                .map_err(|e| to_storage_err(e.to_string()))
        })
    }

    fn list_bodies(&self, sql: &str, key: &str) -> CbieResult<Vec<(String, String)>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(sql)
                .map_err(|e| to_storage_err(e.to_string()))?;
            let rows = stmt
                .query_map(params![key], |row| Ok((row.get(0)?, row.get(1)?)))
                .map_err(|e| to_storage_err(e.to_string()))?;
            rows.collect::<Result<Vec<(String, String)>, _>>()
                .map_err(|e| to_storage_err(e.to_string()))
        })
    }
}

impl IDocumentStore for SqliteStore {
    fn put_prompt(&self, prompt: &Prompt) -> CbieResult<()> {
        let body = serde_json::to_string(prompt)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO prompts (prompt_id, user_id, timestamp, body) VALUES (?1, ?2, ?3, ?4)",
                params![prompt.prompt_id, prompt.user_id, prompt.timestamp, body],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }

    fn get_prompt(&self, prompt_id: &str) -> CbieResult<Option<Prompt>> {
        self.get_body("SELECT body FROM prompts WHERE prompt_id = ?1", prompt_id)?
            .map(|body| parse_body(prompt_id, &body))
            .transpose()
    }

    fn prompts_for_user(&self, user_id: &str) -> CbieResult<Vec<Prompt>> {
        self.list_bodies(
            "SELECT prompt_id, body FROM prompts WHERE user_id = ?1 ORDER BY timestamp, prompt_id",
            user_id,
        )?
        .iter()
        .map(|(id, body)| parse_body(id, body))
        .collect()
    }

    fn put_profile(&self, profile: &BehaviorProfile) -> CbieResult<()> {
        let body = serde_json::to_string(profile)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO profiles (user_id, generated_at, body) VALUES (?1, ?2, ?3)",
                params![profile.user_id, profile.generated_at.to_rfc3339(), body],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }

    fn get_profile(&self, user_id: &str) -> CbieResult<Option<BehaviorProfile>> {
        self.get_body("SELECT body FROM profiles WHERE user_id = ?1", user_id)?
            .map(|body| parse_body(user_id, &body))
            .transpose()
    }

    fn put_legacy_behavior(&self, record: &LegacyBehaviorRecord) -> CbieResult<()> {
        let body = serde_json::to_string(record)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO legacy_behaviors (behavior_id, user_id, body) VALUES (?1, ?2, ?3)",
                params![record.behavior_id, record.user_id, body],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }

    fn get_legacy_behavior(&self, behavior_id: &str) -> CbieResult<Option<LegacyBehaviorRecord>> {
        self.get_body(
            "SELECT body FROM legacy_behaviors WHERE behavior_id = ?1",
            behavior_id,
        )?
        .map(|body| parse_body(behavior_id, &body))
        .transpose()
    }

    fn legacy_behaviors_for_user(&self, user_id: &str) -> CbieResult<Vec<LegacyBehaviorRecord>> {
        self.list_bodies(
            "SELECT behavior_id, body FROM legacy_behaviors WHERE user_id = ?1 ORDER BY behavior_id",
            user_id,
        )?
        .iter()
        .map(|(id, body)| parse_body(id, body))
        .collect()
    }
}
