use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{null_as_default, Period};

/// Everything stored for one user: the periods and the active pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub periods: Vec<Period>,
    #[serde(default)]
    pub active_period_id: Option<Uuid>,
}

impl AppState {
    pub fn period(&self, id: Uuid) -> Option<&Period> {
        self.periods.iter().find(|period| period.id == id)
    }

    pub fn period_mut(&mut self, id: Uuid) -> Option<&mut Period> {
        self.periods.iter_mut().find(|period| period.id == id)
    }

    pub fn active_period(&self) -> Option<&Period> {
        self.active_period_id.and_then(|id| self.period(id))
    }

    pub fn active_period_mut(&mut self) -> Option<&mut Period> {
        let id = self.active_period_id?;
        self.period_mut(id)
    }

    pub fn is_active(&self, id: Uuid) -> bool {
        self.active_period_id == Some(id)
    }

    /// Restores the active pointer invariant when the pointer is unset or
    /// dangling. The latest open period is adopted and any other open one is
    /// closed at `now`; with nothing open a zero-salary period is started.
    /// Returns whether the state changed.
    pub fn ensure_active(&mut self, now: DateTime<Utc>) -> bool {
        if self.active_period().is_some() {
            return false;
        }
        let adopted = self
            .periods
            .iter()
            .rev()
            .find(|period| period.is_open())
            .map(|period| period.id);
        match adopted {
            Some(id) => {
                for period in self.periods.iter_mut().filter(|period| period.id != id) {
                    period.close(now);
                }
                self.active_period_id = Some(id);
            }
            None => {
                let period = Period::new(0, 0, now);
                self.active_period_id = Some(period.id);
                self.periods.push(period);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_active_repairs_dangling_pointer() {
        let mut state = AppState {
            periods: Vec::new(),
            active_period_id: Some(Uuid::new_v4()),
        };
        assert!(state.ensure_active(Utc::now()));
        assert_eq!(state.periods.len(), 1);
        assert_eq!(state.active_period().map(|p| p.salary_hot), Some(0));
        assert!(!state.ensure_active(Utc::now()));
    }

    #[test]
    fn ensure_active_adopts_the_stored_open_period() {
        let now = Utc::now();
        let earlier = now - chrono::Duration::days(60);
        let mut closed = Period::new(1, 1, earlier);
        closed.close(earlier);
        let open = Period::new(10, 20, earlier);
        let newest_open = Period::new(30, 40, now);
        let (closed_id, open_id, newest_id) = (closed.id, open.id, newest_open.id);
        let mut state = AppState {
            periods: vec![closed, open, newest_open],
            active_period_id: Some(Uuid::new_v4()),
        };

        assert!(state.ensure_active(now));
        assert_eq!(state.periods.len(), 3);
        assert_eq!(state.active_period_id, Some(newest_id));
        assert_eq!(state.periods.iter().filter(|p| p.is_open()).count(), 1);
        assert_eq!(state.period(open_id).and_then(|p| p.end_date), Some(now));
        assert_eq!(state.period(closed_id).and_then(|p| p.end_date), Some(earlier));
    }

    #[test]
    fn null_periods_load_as_empty() {
        let state: AppState =
            serde_json::from_str(r#"{"periods": null, "activePeriodId": null}"#).unwrap();
        assert!(state.periods.is_empty());
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let state: AppState = serde_json::from_str("{}").unwrap();
        assert!(state.periods.is_empty());
        assert!(state.active_period_id.is_none());
    }
}
