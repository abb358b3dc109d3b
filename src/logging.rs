//! Logger initialization for hosts that don't bring their own.
//!
//! The crate logs through the `log` facade only; this module wires up an
//! `env_logger` backend for binaries and tests that want output without
//! ceremony. Libraries embedding the graph in a larger engine should skip
//! it and install their own subscriber.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Filter resolution order: the `filter` argument, then the `RUST_LOG`
/// environment variable, then a `warn`-level default. Idempotent;
/// subsequent calls are ignored, so tests can call it freely.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        // Tests install their own capture-friendly logger.
        builder.is_test(cfg!(test)).init();

        log::debug!("logging initialized");
    });
}
