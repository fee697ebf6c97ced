#![doc(test(attr(deny(warnings))))]

//! Ryugaku Core is the directory and cost-estimation engine behind a Japanese
//! language school guide for Chinese students: school listings and
//! comparison, fee tables, a study cost calculator, consultation intake, and
//! the back-office services and JSON storage that keep them.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod currency;
pub mod directory;
pub mod domain;
pub mod errors;
pub mod estimator;
pub mod seed;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("ryugaku_core tracing initialized");
    });
}
