//! Tracing subscriber setup driven by CLI verbosity.
//!
//! `VIGIA_LOG` overrides the verbosity-derived filter when set, using the
//! usual `EnvFilter` directive syntax.

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "VIGIA_LOG";

/// Default filter directive for a verbosity level
#[must_use]
pub const fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "info",
        Verbosity::Debug => "debug",
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so report paths and case lines on stdout stay clean.
/// Calling this twice is harmless; the second install is ignored.
pub fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
