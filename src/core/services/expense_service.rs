use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use super::input::{normalize_name, validate_amount};
use crate::{
    domain::{AppState, Bucket, Expense, Money},
    errors::TrackerError,
};

pub struct ExpenseService;

impl ExpenseService {
    /// Validates and appends an expense to the active period.
    pub fn add(
        state: &mut AppState,
        name: &str,
        amount: Money,
        bucket: Bucket,
        now: DateTime<Utc>,
    ) -> Result<Uuid, TrackerError> {
        let name = normalize_name(name)?;
        validate_amount(amount)?;
        let period = state
            .active_period_mut()
            .ok_or(TrackerError::NoActivePeriod)?;
        let expense = Expense::new(name, amount, bucket, now);
        let id = expense.id;
        info!(period = %period.id, expense = %id, amount, %bucket, "expense added");
        period.expenses.push(expense);
        Ok(id)
    }

    pub fn find(state: &AppState, period_id: Uuid, expense_id: Uuid) -> Option<&Expense> {
        state.period(period_id)?.expense(expense_id)
    }

    /// Replaces the amount of an expense. `Ok(None)` when either id is unknown.
    pub fn update_amount(
        state: &mut AppState,
        period_id: Uuid,
        expense_id: Uuid,
        amount: Money,
    ) -> Result<Option<&Expense>, TrackerError> {
        validate_amount(amount)?;
        let Some(expense) = state
            .period_mut(period_id)
            .and_then(|period| period.expense_mut(expense_id))
        else {
            return Ok(None);
        };
        info!(expense = %expense_id, from = expense.amount, to = amount, "expense amount edited");
        expense.amount = amount;
        Ok(Some(expense))
    }

    pub fn delete(state: &mut AppState, period_id: Uuid, expense_id: Uuid) -> Option<Expense> {
        let period = state.period_mut(period_id)?;
        let index = period
            .expenses
            .iter()
            .position(|expense| expense.id == expense_id)?;
        info!(period = %period_id, expense = %expense_id, "expense deleted");
        Some(period.expenses.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::PeriodService;

    fn state_with_active() -> (AppState, Uuid) {
        let mut state = AppState::default();
        let id = PeriodService::start_new(&mut state, 0, 0, Utc::now());
        (state, id)
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let (mut state, period) = state_with_active();
        ExpenseService::add(&mut state, "rent", 100, Bucket::Cold, Utc::now()).unwrap();
        ExpenseService::add(&mut state, " snacks ", 5, Bucket::Hot, Utc::now()).unwrap();
        let names: Vec<_> = state.period(period).unwrap().expenses.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["rent", "snacks"]);
    }

    #[test]
    fn add_rejects_invalid_input_without_mutation() {
        let (mut state, period) = state_with_active();
        assert!(ExpenseService::add(&mut state, "  ", 10, Bucket::Hot, Utc::now()).is_err());
        assert!(ExpenseService::add(&mut state, "tea", 0, Bucket::Hot, Utc::now()).is_err());
        assert!(ExpenseService::add(&mut state, "tea", -3, Bucket::Hot, Utc::now()).is_err());
        assert!(state.period(period).unwrap().expenses.is_empty());
    }

    #[test]
    fn add_without_active_period_fails() {
        let mut state = AppState::default();
        let err = ExpenseService::add(&mut state, "tea", 1, Bucket::Hot, Utc::now()).unwrap_err();
        assert!(matches!(err, TrackerError::NoActivePeriod));
    }

    #[test]
    fn update_amount_changes_only_amount() {
        let (mut state, period) = state_with_active();
        let id = ExpenseService::add(&mut state, "tea", 10, Bucket::Hot, Utc::now()).unwrap();
        let before = ExpenseService::find(&state, period, id).cloned().unwrap();
        let updated = ExpenseService::update_amount(&mut state, period, id, 25)
            .unwrap()
            .cloned()
            .unwrap();
        assert_eq!(updated.amount, 25);
        assert_eq!(updated.name, before.name);
        assert_eq!(updated.bucket, before.bucket);
        assert_eq!(updated.date, before.date);
    }

    #[test]
    fn update_amount_on_unknown_ids_is_noop() {
        let (mut state, period) = state_with_active();
        let missing = ExpenseService::update_amount(&mut state, period, Uuid::new_v4(), 5).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn delete_removes_matching_expense() {
        let (mut state, period) = state_with_active();
        let keep = ExpenseService::add(&mut state, "a", 1, Bucket::Hot, Utc::now()).unwrap();
        let drop = ExpenseService::add(&mut state, "b", 2, Bucket::Cold, Utc::now()).unwrap();
        assert_eq!(ExpenseService::delete(&mut state, period, drop).map(|e| e.id), Some(drop));
        assert!(ExpenseService::delete(&mut state, period, drop).is_none());
        let remaining: Vec<_> = state.period(period).unwrap().expenses.iter().map(|e| e.id).collect();
        assert_eq!(remaining, [keep]);
    }
}
