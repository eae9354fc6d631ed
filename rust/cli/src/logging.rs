//! Diagnostic logging for the `casino` binary.
//!
//! Engine events are emitted with `tracing`; this module installs the
//! subscriber that prints them to stderr. The filter comes from `CASINO_LOG`
//! (any `EnvFilter` directive) and otherwise from the `-v` count.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CASINO_LOG";

/// Default directive for a given number of `-v` flags.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Installs the global subscriber. Later calls are no-ops, so tests that run
/// the CLI repeatedly in one process are unaffected.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
