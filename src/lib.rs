#![doc(test(attr(deny(warnings))))]

//! Income Core tracks incoming payments for a signed-in user, rolls them up
//! into week, month, and year windows, and measures progress toward a single
//! income goal. The `income_core_cli` shell is built on top of it.

pub mod app;
pub mod cli;
pub mod currency;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Income Core tracing initialized.");
    });
}
