#![doc(test(attr(deny(warnings))))]

//! Forecast Core computes commute cost breakdowns, monthly cash-flow
//! summaries and fleet expense totals, and decides how much of each a
//! subscription tier may see.

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod time;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Forecast Core tracing initialized.");
    });
}
