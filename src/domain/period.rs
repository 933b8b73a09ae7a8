use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Bucket, Expense, Money};

/// One salary cycle with a salary for each bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub id: Uuid,
    #[serde(alias = "salaryPanas")]
    pub salary_hot: Money,
    #[serde(alias = "salaryDingin")]
    pub salary_cold: Money,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub expenses: Vec<Expense>,
}

impl Period {
    pub fn new(salary_hot: Money, salary_cold: Money, start_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            salary_hot,
            salary_cold,
            start_date,
            end_date: None,
            expenses: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_date.is_none()
    }

    /// Sets the end date unless one is already recorded. Returns whether it changed.
    pub fn close(&mut self, at: DateTime<Utc>) -> bool {
        if self.end_date.is_some() {
            return false;
        }
        self.end_date = Some(at);
        true
    }

    pub fn salary(&self, bucket: Bucket) -> Money {
        match bucket {
            Bucket::Hot => self.salary_hot,
            Bucket::Cold => self.salary_cold,
        }
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|expense| expense.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn close_sets_end_date_once() {
        let mut period = Period::new(100, 50, at(8));
        assert!(period.is_open());
        assert!(period.close(at(9)));
        assert!(!period.close(at(10)));
        assert_eq!(period.end_date, Some(at(9)));
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let period = Period::new(100, 50, at(8));
        let json = serde_json::to_value(&period).unwrap();
        assert_eq!(json["salaryHot"], 100);
        assert_eq!(json["salaryCold"], 50);
        assert!(json["startDate"].is_string());
        assert!(json["endDate"].is_null());
        assert!(json["expenses"].as_array().unwrap().is_empty());
    }
}
