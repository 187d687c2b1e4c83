use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::vector_record::VectorRecord;
use crate::constants::{fallback_prompt_id, DEFAULT_STORED_QUALITY_SCORE, USER_ID_KEY};

/// One reported instance of a behavior.
///
/// Immutable once extracted. The pipeline treats a user's full observation
/// set as the complete input of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub observation_id: String,
    /// Free-text description of the behavior.
    pub text: String,
    /// Filled in by the pipeline when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    /// How trustworthy the source was, in (0, 1].
    pub credibility: f64,
    /// How clearly the behavior was expressed, in (0, 1].
    pub clarity: f64,
    /// Extractor confidence, in (0, 1].
    pub extraction_confidence: f64,
    /// Unix seconds.
    pub timestamp: i64,
    /// The prompt this observation was extracted from.
    pub prompt_id: String,
    /// Per-observation decay rate, used only by the legacy adjusted weight.
    pub decay_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Observation {
    /// An observation with the stored-metadata default quality scores and decay rate.
    pub fn new(
        observation_id: impl Into<String>,
        text: impl Into<String>,
        timestamp: i64,
        prompt_id: impl Into<String>,
    ) -> Self {
        Self {
            observation_id: observation_id.into(),
            text: text.into(),
            embedding: None,
            credibility: DEFAULT_STORED_QUALITY_SCORE,
            clarity: DEFAULT_STORED_QUALITY_SCORE,
            extraction_confidence: DEFAULT_STORED_QUALITY_SCORE,
            timestamp,
            prompt_id: prompt_id.into(),
            decay_rate: crate::config::defaults::DEFAULT_OBSERVATION_DECAY_RATE,
            user_id: None,
            session_id: None,
        }
    }

    pub fn with_scores(mut self, credibility: f64, clarity: f64, extraction_confidence: f64) -> Self {
        self.credibility = credibility;
        self.clarity = clarity;
        self.extraction_confidence = extraction_confidence;
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_decay_rate(mut self, decay_rate: f64) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    /// Vector-store metadata payload: every field except the embedding.
    pub fn to_metadata(&self) -> Map<String, Value> {
        let mut meta = Map::new();
        meta.insert("observation_id".into(), Value::from(self.observation_id.clone()));
        meta.insert("text".into(), Value::from(self.text.clone()));
        meta.insert("credibility".into(), Value::from(self.credibility));
        meta.insert("clarity".into(), Value::from(self.clarity));
        meta.insert(
            "extraction_confidence".into(),
            Value::from(self.extraction_confidence),
        );
        meta.insert("timestamp".into(), Value::from(self.timestamp));
        meta.insert("prompt_id".into(), Value::from(self.prompt_id.clone()));
        meta.insert("decay_rate".into(), Value::from(self.decay_rate));
        if let Some(user_id) = &self.user_id {
            meta.insert(USER_ID_KEY.into(), Value::from(user_id.clone()));
        }
        if let Some(session_id) = &self.session_id {
            meta.insert("session_id".into(), Value::from(session_id.clone()));
        }
        meta
    }

    /// Rebuild an observation from a stored vector record.
    ///
    /// Missing quality scores become 0.8, a missing decay rate becomes
    /// `default_decay_rate`, a missing timestamp falls back to `created_at`
    /// and then to `fallback_timestamp`, and a missing prompt reference
    /// becomes `prompt_{timestamp}`.
    pub fn from_vector_record(
        record: &VectorRecord,
        fallback_timestamp: i64,
        default_decay_rate: f64,
    ) -> Self {
        let meta = &record.metadata;
        let text_field = |key: &str| meta.get(key).and_then(Value::as_str).map(str::to_string);
        let score =
            |key: &str| meta.get(key).and_then(Value::as_f64).unwrap_or(DEFAULT_STORED_QUALITY_SCORE);

        let timestamp = epoch_seconds(meta.get("timestamp"))
            .or_else(|| epoch_seconds(meta.get("created_at")))
            .unwrap_or(fallback_timestamp);

        Self {
            observation_id: text_field("observation_id").unwrap_or_else(|| record.id.clone()),
            text: text_field("text").unwrap_or_default(),
            embedding: (!record.vector.is_empty()).then(|| record.vector.clone()),
            credibility: score("credibility"),
            clarity: score("clarity"),
            extraction_confidence: score("extraction_confidence"),
            timestamp,
            prompt_id: text_field("prompt_id").unwrap_or_else(|| fallback_prompt_id(timestamp)),
            decay_rate: meta
                .get("decay_rate")
                .and_then(Value::as_f64)
                .unwrap_or(default_decay_rate),
            user_id: text_field(USER_ID_KEY),
            session_id: text_field("session_id"),
        }
    }
}

/// Epoch seconds from an integer or a float (truncated) JSON number.
fn epoch_seconds(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}
