use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Bucket, Money};

/// A single spending record. Only `amount` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    pub amount: Money,
    #[serde(alias = "type")]
    pub bucket: Bucket,
    pub date: DateTime<Utc>,
}

impl Expense {
    pub fn new(name: impl Into<String>, amount: Money, bucket: Bucket, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            bucket,
            date,
        }
    }
}
