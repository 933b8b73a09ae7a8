use serde::Serialize;

use crate::domain::{Bucket, Money, Period};

/// Salary, spending, and what is left for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BucketSummary {
    pub salary: Money,
    pub spent: Money,
    pub remaining: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PeriodSummary {
    pub hot: BucketSummary,
    pub cold: BucketSummary,
}

impl PeriodSummary {
    pub fn bucket(&self, bucket: Bucket) -> &BucketSummary {
        match bucket {
            Bucket::Hot => &self.hot,
            Bucket::Cold => &self.cold,
        }
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Partitions spending by bucket. `remaining` is not clamped and may go
    /// negative; totals saturate at the `Money` bounds instead of overflowing.
    pub fn compute(period: &Period) -> PeriodSummary {
        let (hot, cold) = Self::totals(period);
        PeriodSummary {
            hot: BucketSummary {
                salary: period.salary_hot,
                spent: hot,
                remaining: period.salary_hot.saturating_sub(hot),
            },
            cold: BucketSummary {
                salary: period.salary_cold,
                spent: cold,
                remaining: period.salary_cold.saturating_sub(cold),
            },
        }
    }

    /// Spent totals as `(hot, cold)`.
    pub fn totals(period: &Period) -> (Money, Money) {
        period
            .expenses
            .iter()
            .fold((0, 0), |(hot, cold), expense| match expense.bucket {
                Bucket::Hot => (hot.saturating_add(expense.amount), cold),
                Bucket::Cold => (hot, cold.saturating_add(expense.amount)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Expense;
    use chrono::Utc;

    #[test]
    fn compute_splits_by_bucket_without_clamping() {
        let mut period = Period::new(1000, 500, Utc::now());
        period.expenses.push(Expense::new("a", 300, Bucket::Hot, Utc::now()));
        period.expenses.push(Expense::new("b", 900, Bucket::Cold, Utc::now()));
        period.expenses.push(Expense::new("c", 200, Bucket::Hot, Utc::now()));

        let summary = SummaryService::compute(&period);
        assert_eq!(
            summary.hot,
            BucketSummary { salary: 1000, spent: 500, remaining: 500 }
        );
        assert_eq!(
            summary.cold,
            BucketSummary { salary: 500, spent: 900, remaining: -400 }
        );
        assert_eq!(summary.bucket(Bucket::Cold).remaining, -400);
    }

    #[test]
    fn huge_totals_saturate() {
        let mut period = Period::new(0, 0, Utc::now());
        period.expenses.push(Expense::new("a", Money::MAX, Bucket::Hot, Utc::now()));
        period.expenses.push(Expense::new("b", 1, Bucket::Hot, Utc::now()));

        let summary = SummaryService::compute(&period);
        assert_eq!(summary.hot.spent, Money::MAX);
        assert_eq!(summary.hot.remaining, -Money::MAX);
        assert_eq!(SummaryService::totals(&period), (Money::MAX, 0));
    }

    #[test]
    fn empty_period_has_full_remaining() {
        let period = Period::new(42, 7, Utc::now());
        let summary = SummaryService::compute(&period);
        assert_eq!(summary.hot.remaining, 42);
        assert_eq!(summary.cold.spent, 0);
    }
}
