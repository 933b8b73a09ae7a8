#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use chrono::{DateTime, TimeZone, Utc};
use money_tracker::{
    core::{clock::ManualClock, session::Session},
    storage::{JsonFileStore, MemoryStore, StateRepository},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
}

/// A unique data directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Session over an in-memory store with a controllable clock.
pub fn memory_session() -> (Session, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start_time()));
    let repository = StateRepository::new(Box::new(MemoryStore::new()));
    (Session::new(repository, Box::new(clock.clone())), clock)
}

/// Session persisting to JSON files under `base`.
pub fn file_session(base: PathBuf) -> (Session, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start_time()));
    let store = JsonFileStore::new(Some(base)).expect("create json store");
    let repository = StateRepository::new(Box::new(store));
    (Session::new(repository, Box::new(clock.clone())), clock)
}
