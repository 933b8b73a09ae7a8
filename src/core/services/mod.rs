//! Pure operations over [`AppState`](crate::domain::AppState). Nothing in
//! here touches storage or the terminal; callers persist and re-render.

pub mod expense_service;
pub mod input;
pub mod period_service;
pub mod summary_service;

pub use expense_service::ExpenseService;
pub use input::{coerce_salary, normalize_name, parse_amount};
pub use period_service::PeriodService;
pub use summary_service::{BucketSummary, PeriodSummary, SummaryService};
