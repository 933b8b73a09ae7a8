use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

/// One of the two independent spending categories of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    #[serde(alias = "panas")]
    Hot,
    #[serde(alias = "dingin")]
    Cold,
}

impl Bucket {
    pub const ALL: [Bucket; 2] = [Bucket::Hot, Bucket::Cold];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Hot => "hot",
            Bucket::Cold => "cold",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = TrackerError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "hot" | "panas" => Ok(Bucket::Hot),
            "cold" | "dingin" => Ok(Bucket::Cold),
            other => Err(TrackerError::validation(format!(
                "unknown bucket `{other}` (expected `hot` or `cold`)"
            ))),
        }
    }
}
