#![doc(test(attr(deny(warnings))))]

//! Money Tracker keeps per-user salary periods with two spending buckets
//! ("hot" and "cold" money), the expenses recorded against them, and the
//! shell that drives it all from a terminal.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Money Tracker tracing initialized.");
    });
}
