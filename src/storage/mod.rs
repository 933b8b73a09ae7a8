//! Key-value persistence for per-user tracker state.

pub mod json_backend;
pub mod memory;

use tracing::debug;

use crate::{domain::AppState, errors::TrackerError};

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, TrackerError>;

pub const STORAGE_KEY_PREFIX: &str = "money-tracker-";

/// Flat string-to-string store; one value per key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}

/// Key holding the serialized state of `username`.
pub fn storage_key(username: &str) -> String {
    format!("{STORAGE_KEY_PREFIX}{username}")
}

/// Reads and writes whole [`AppState`] snapshots through a [`KeyValueStore`].
pub struct StateRepository {
    store: Box<dyn KeyValueStore>,
}

impl StateRepository {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn save(&self, username: &str, state: &AppState) -> Result<()> {
        let key = storage_key(username);
        let json = serde_json::to_string_pretty(state)?;
        self.store.set(&key, &json)?;
        debug!(%key, periods = state.periods.len(), "state saved");
        Ok(())
    }

    /// Missing keys yield an empty state; unparsable values are an error.
    pub fn load(&self, username: &str) -> Result<AppState> {
        let key = storage_key(username);
        let Some(raw) = self.store.get(&key)? else {
            debug!(%key, "no stored state");
            return Ok(AppState::default());
        };
        let state: AppState = serde_json::from_str(&raw).map_err(|err| {
            TrackerError::Storage(format!("stored data for `{username}` is malformed: {err}"))
        })?;
        debug!(%key, periods = state.periods.len(), "state loaded");
        Ok(state)
    }

    /// Usernames that currently have stored state.
    pub fn usernames(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .store
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(STORAGE_KEY_PREFIX).map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_uses_fixed_prefix() {
        assert_eq!(storage_key("alice"), "money-tracker-alice");
    }

    #[test]
    fn load_of_unknown_user_is_empty() {
        let repo = StateRepository::new(Box::new(MemoryStore::default()));
        assert_eq!(repo.load("nobody").unwrap(), AppState::default());
    }

    #[test]
    fn load_reports_malformed_data() {
        let store = MemoryStore::default();
        store.set(&storage_key("bob"), "{not json").unwrap();
        let repo = StateRepository::new(Box::new(store));
        let err = repo.load("bob").unwrap_err();
        assert!(matches!(err, TrackerError::Storage(_)));
        assert!(err.to_string().contains("bob"));
    }

    #[test]
    fn usernames_lists_only_tracker_keys() {
        let store = MemoryStore::default();
        store.set("unrelated", "x").unwrap();
        let repo = StateRepository::new(Box::new(store));
        repo.save("zoe", &AppState::default()).unwrap();
        repo.save("amy", &AppState::default()).unwrap();
        assert_eq!(repo.usernames().unwrap(), ["amy", "zoe"]);
    }
}
