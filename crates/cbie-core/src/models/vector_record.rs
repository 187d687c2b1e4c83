use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored vector with its metadata payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub vector: Vec<f32>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl VectorRecord {
    pub fn new(id: impl Into<String>, vector: Vec<f32>, metadata: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            vector,
            metadata,
        }
    }
}

/// Conjunction of metadata equality conditions. Empty matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataFilter {
    conditions: Vec<(String, Value)>,
}

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_user(user_id: &str) -> Self {
        Self::new().eq(crate::constants::USER_ID_KEY, user_id)
    }

    pub fn eq(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((key.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, metadata: &Map<String, Value>) -> bool {
        self.conditions
            .iter()
            .all(|(key, value)| metadata.get(key) == Some(value))
    }
}
