//! Periods, expenses, and the per-user state that owns them.

pub mod bucket;
pub mod expense;
pub mod period;
pub mod state;

pub use bucket::Bucket;
pub use expense::Expense;
pub use period::Period;
pub use state::AppState;

use serde::{Deserialize, Deserializer};

/// Monetary amounts are whole units of the user's currency.
pub type Money = i64;

/// Reads an explicit `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
