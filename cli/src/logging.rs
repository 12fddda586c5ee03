//! Diagnostic logging setup.
//!
//! Events go to stderr so they never interleave with the status line on
//! stdout. The subscriber is scoped to the returned guard.

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured filter.
pub const LOG_ENV: &str = "SCALEOVER_LOG";

/// Filter used before the config file has been read.
pub const DEFAULT_LEVEL: &str = "warn";

/// Build the filter from `SCALEOVER_LOG`, falling back to `default_level`.
#[must_use]
pub fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install a stderr subscriber for the current thread.
#[must_use]
pub fn init(default_level: &str, no_color: bool) -> DefaultGuard {
    let ansi = !no_color && console::Term::stderr().is_term();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter(default_level))
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .finish();
    tracing::subscriber::set_default(subscriber)
}
