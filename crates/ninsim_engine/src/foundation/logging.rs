//! Logging setup
//!
//! Diagnostics are written to standard output through `env_logger`.

use std::sync::Once;

pub use log::{debug, error, info, trace, warn};

static INIT: Once = Once::new();

/// Initialize the logging system with the given filter
///
/// `RUST_LOG` takes precedence over `filter` when set. Only the first call
/// installs a logger; later calls are ignored.
pub fn init(filter: &str) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match std::env::var("RUST_LOG") {
            Ok(env_filter) if !env_filter.is_empty() => builder.parse_filters(&env_filter),
            _ => builder.parse_filters(filter),
        };

        builder.target(env_logger::Target::Stdout);

        if builder.try_init().is_err() {
            // Another logger (e.g. a test harness) is already installed.
            return;
        }

        log::debug!("logging initialized with filter '{filter}'");
    });
}
