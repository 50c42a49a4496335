// SPDX-License-Identifier: GPL-3.0-only

use tracing_subscriber::EnvFilter;

use crate::config::LoggingLevel;

/// Log to stderr; stdout carries the JSON result.
///
/// `RUST_LOG` takes precedence over the configured level.
pub(crate) fn init(level: LoggingLevel) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let result = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init();

    if let Err(e) = result {
        eprintln!("aix-lvol: failed to initialize logging: {e}");
    }
}
