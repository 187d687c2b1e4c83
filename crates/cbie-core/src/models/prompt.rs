use serde::{Deserialize, Serialize};

/// A user prompt that observations were extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub prompt_id: String,
    pub prompt_text: String,
    /// Unix seconds.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Prompt {
    pub fn new(prompt_id: impl Into<String>, prompt_text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            prompt_id: prompt_id.into(),
            prompt_text: prompt_text.into(),
            timestamp,
            tokens: None,
            user_id: None,
            session_id: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}
