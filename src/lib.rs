#![doc(test(attr(deny(warnings))))]

//! Finance Core offers the ledger, budgeting, and reporting primitives that
//! power a multi-user personal finance tracker and its terminal front end.

pub mod cli;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
