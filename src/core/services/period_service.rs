use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::domain::{AppState, Money, Period};

/// Removed period plus the replacement started when it was the active one.
#[derive(Debug, Clone)]
pub struct DeletedPeriod {
    pub period: Period,
    pub replacement: Option<Uuid>,
}

pub struct PeriodService;

impl PeriodService {
    /// Appends an open period and makes it the active one.
    pub fn start_new(
        state: &mut AppState,
        salary_hot: Money,
        salary_cold: Money,
        now: DateTime<Utc>,
    ) -> Uuid {
        let period = Period::new(salary_hot, salary_cold, now);
        let id = period.id;
        state.periods.push(period);
        state.active_period_id = Some(id);
        info!(period = %id, salary_hot, salary_cold, "period started");
        id
    }

    /// Ends the active period. No-op when there is none or it is already closed.
    pub fn close_active(state: &mut AppState, now: DateTime<Utc>) -> bool {
        let Some(active) = state.active_period_mut() else {
            return false;
        };
        let closed = active.close(now);
        if closed {
            info!(period = %active.id, "period closed");
        }
        closed
    }

    pub fn start_cycle(
        state: &mut AppState,
        salary_hot: Money,
        salary_cold: Money,
        now: DateTime<Utc>,
    ) -> Uuid {
        Self::close_active(state, now);
        Self::start_new(state, salary_hot, salary_cold, now)
    }

    /// Removes a period; deleting the active one starts a zero-salary replacement.
    pub fn delete(state: &mut AppState, id: Uuid, now: DateTime<Utc>) -> Option<DeletedPeriod> {
        let index = state.periods.iter().position(|period| period.id == id)?;
        let period = state.periods.remove(index);
        info!(period = %id, expenses = period.expenses.len(), "period deleted");
        let replacement = if state.is_active(id) {
            Some(Self::start_new(state, 0, 0, now))
        } else {
            None
        };
        Some(DeletedPeriod {
            period,
            replacement,
        })
    }
}
