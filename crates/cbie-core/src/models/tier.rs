use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Cluster tier, a pure function of strength at assembly time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Primary,
    Secondary,
    Noise,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Primary => "PRIMARY",
            Tier::Secondary => "SECONDARY",
            Tier::Noise => "NOISE",
        }
    }

    pub fn is_noise(self) -> bool {
        self == Tier::Noise
    }

    /// Sort key: PRIMARY first.
    pub fn rank(self) -> u8 {
        match self {
            Tier::Primary => 0,
            Tier::Secondary => 1,
            Tier::Noise => 2,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tier: {0}")]
pub struct ParseTierError(pub String);

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PRIMARY" => Ok(Tier::Primary),
            "SECONDARY" => Ok(Tier::Secondary),
            "NOISE" => Ok(Tier::Noise),
            _ => Err(ParseTierError(s.to_string())),
        }
    }
}
