use serde::{Deserialize, Serialize};

/// Interval-style behavior record from the per-behavior scoring era.
///
/// Only read through the legacy adapter, which turns it into an `Observation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyBehaviorRecord {
    pub behavior_id: String,
    pub behavior_text: String,
    pub credibility: f64,
    pub clarity_score: f64,
    pub extraction_confidence: f64,
    pub reinforcement_count: u32,
    pub decay_rate: f64,
    /// Unix seconds.
    pub created_at: i64,
    /// Unix seconds.
    pub last_seen: i64,
    #[serde(default)]
    pub prompt_history_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}
