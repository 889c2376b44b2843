//! Logging setup utilities for the QuikVote binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// Both the server library crate and the binary get the same level, e.g.
/// `quikvote_server=debug,quikvote_server_bin=debug,tower_http=debug`.
pub fn default_directive(crate_name: &str, binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={level},{}={level},tower_http={level}",
        crate_name.replace('-', "_"),
        binary_name.replace('-', "_"),
        level = default_log_level
    )
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_name` - The library crate whose spans should be logged (e.g. "quikvote-server")
/// * `binary_name` - The name of the binary (e.g. "quikvote-server")
/// * `default_log_level` - The default log level (e.g. "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use quikvote_shared::logger::setup_logger;
///
/// setup_logger("quikvote-server", "quikvote-server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_directive(crate_name, binary_name, default_log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
