//! Login gate and the user-facing operations. A [`Session`] owns the loaded
//! state; every applied mutation is persisted before the call returns.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    core::{
        clock::Clock,
        services::{
            input::validate_amount, ExpenseService, PeriodService, PeriodSummary, SummaryService,
        },
    },
    domain::{AppState, Bucket, Money, Period},
    errors::TrackerError,
    storage::StateRepository,
};

pub type SessionResult<T> = Result<T, TrackerError>;

/// Asks the user to approve a destructive action.
pub trait Confirmer {
    fn confirm(&mut self, prompt: &str) -> SessionResult<bool>;
}

/// Answers every prompt the same way.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirmer for AutoConfirm {
    fn confirm(&mut self, prompt: &str) -> SessionResult<bool> {
        debug!(prompt, answer = self.0, "auto confirmation");
        Ok(self.0)
    }
}

/// Result of an operation that can be declined or miss its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Declined,
    NotFound,
}

#[derive(Debug)]
pub struct UserSession {
    pub username: String,
    pub state: AppState,
}

#[derive(Debug, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(UserSession),
}

pub struct Session {
    repository: StateRepository,
    clock: Box<dyn Clock>,
    state: SessionState,
}

impl Session {
    pub fn new(repository: StateRepository, clock: Box<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            state: SessionState::LoggedOut,
        }
    }

    pub fn repository(&self) -> &StateRepository {
        &self.repository
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn(_))
    }

    pub fn username(&self) -> Option<&str> {
        match &self.state {
            SessionState::LoggedIn(user) => Some(user.username.as_str()),
            SessionState::LoggedOut => None,
        }
    }

    pub fn state(&self) -> SessionResult<&AppState> {
        match &self.state {
            SessionState::LoggedIn(user) => Ok(&user.state),
            SessionState::LoggedOut => Err(TrackerError::NotLoggedIn),
        }
    }

    pub fn active_period(&self) -> SessionResult<&Period> {
        self.state()?
            .active_period()
            .ok_or(TrackerError::NoActivePeriod)
    }

    /// LoggedOut → LoggedIn. Loads the user's partition and guarantees an
    /// active period, persisting immediately when one had to be created.
    pub fn login(&mut self, username: &str) -> SessionResult<()> {
        if let SessionState::LoggedIn(user) = &self.state {
            return Err(TrackerError::AlreadyLoggedIn(user.username.clone()));
        }
        let username = username.trim();
        if username.is_empty() {
            return Err(TrackerError::validation("username must not be empty"));
        }

        let mut state = self.repository.load(username)?;
        if state.ensure_active(self.clock.now()) {
            info!(user = username, active = ?state.active_period_id, "active period restored");
            self.persist_state(username, &state);
        }
        info!(user = username, periods = state.periods.len(), "logged in");
        self.state = SessionState::LoggedIn(UserSession {
            username: username.to_string(),
            state,
        });
        Ok(())
    }

    /// Closes the active period and opens a new one after confirmation.
    pub fn start_period_cycle(
        &mut self,
        salary_hot: Money,
        salary_cold: Money,
        confirmer: &mut dyn Confirmer,
    ) -> SessionResult<Outcome> {
        self.state()?;
        if !confirmer.confirm("Close current period and start a new one?")? {
            return Ok(Outcome::Declined);
        }
        let now = self.clock.now();
        self.mutate(|state| Ok(PeriodService::start_cycle(state, salary_hot, salary_cold, now)))?;
        Ok(Outcome::Applied)
    }

    /// Permanently removes a period after confirmation.
    pub fn delete_period(
        &mut self,
        period_id: Uuid,
        confirmer: &mut dyn Confirmer,
    ) -> SessionResult<Outcome> {
        if self.state()?.period(period_id).is_none() {
            debug!(period = %period_id, "delete requested for unknown period");
            return Ok(Outcome::NotFound);
        }
        if !confirmer.confirm("Delete this period permanently?")? {
            return Ok(Outcome::Declined);
        }
        let now = self.clock.now();
        let deleted = self.mutate(|state| Ok(PeriodService::delete(state, period_id, now)))?;
        if let Some(deleted) = deleted {
            debug!(
                period = %deleted.period.id,
                expenses = deleted.period.expenses.len(),
                replacement = ?deleted.replacement,
                "period removed"
            );
        }
        Ok(Outcome::Applied)
    }

    /// Records an expense in the active period.
    pub fn add_expense(
        &mut self,
        name: &str,
        amount: Money,
        bucket: Bucket,
    ) -> SessionResult<Uuid> {
        let now = self.clock.now();
        self.mutate(|state| ExpenseService::add(state, name, amount, bucket, now))
    }

    /// Changes an expense amount, showing `old → new` for confirmation.
    pub fn edit_expense_amount(
        &mut self,
        period_id: Uuid,
        expense_id: Uuid,
        new_amount: Money,
        confirmer: &mut dyn Confirmer,
    ) -> SessionResult<Outcome> {
        let Some(expense) = ExpenseService::find(self.state()?, period_id, expense_id) else {
            debug!(period = %period_id, expense = %expense_id, "edit requested for unknown expense");
            return Ok(Outcome::NotFound);
        };
        validate_amount(new_amount)?;
        let prompt = format!(
            "Change value of `{}`? {} → {}",
            expense.name, expense.amount, new_amount
        );
        if !confirmer.confirm(&prompt)? {
            return Ok(Outcome::Declined);
        }
        self.mutate(|state| {
            ExpenseService::update_amount(state, period_id, expense_id, new_amount)
                .map(|updated| updated.is_some())
        })?;
        Ok(Outcome::Applied)
    }

    /// Removes an expense. Not confirmed, unlike period deletion.
    pub fn delete_expense(&mut self, period_id: Uuid, expense_id: Uuid) -> SessionResult<Outcome> {
        if ExpenseService::find(self.state()?, period_id, expense_id).is_none() {
            debug!(period = %period_id, expense = %expense_id, "delete requested for unknown expense");
            return Ok(Outcome::NotFound);
        }
        self.mutate(|state| Ok(ExpenseService::delete(state, period_id, expense_id)))?;
        Ok(Outcome::Applied)
    }

    pub fn summary(&self) -> SessionResult<PeriodSummary> {
        Ok(SummaryService::compute(self.active_period()?))
    }

    /// Applies `apply` to the loaded state, restores the active pointer
    /// invariant, and persists. A failing `apply` must leave the state as it was.
    fn mutate<T>(
        &mut self,
        apply: impl FnOnce(&mut AppState) -> SessionResult<T>,
    ) -> SessionResult<T> {
        let now = self.clock.now();
        let SessionState::LoggedIn(user) = &mut self.state else {
            return Err(TrackerError::NotLoggedIn);
        };
        let value = apply(&mut user.state)?;
        user.state.ensure_active(now);
        persist(&self.repository, &user.username, &user.state);
        Ok(value)
    }

    fn persist_state(&self, username: &str, state: &AppState) {
        persist(&self.repository, username, state);
    }
}

/// Save failures are logged and otherwise ignored; the in-memory state stays
/// authoritative for the rest of the session.
fn persist(repository: &StateRepository, username: &str, state: &AppState) {
    if let Err(err) = repository.save(username, state) {
        warn!(user = username, error = %err, "failed to persist state");
    }
}
