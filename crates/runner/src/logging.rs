//! Diagnostic logging setup
//!
//! The transcript goes to the sink given to the runner. Diagnostics go through
//! `tracing`; this installs a stderr subscriber for binaries that want them.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MERETDD_LOG=debug`.
pub const LOG_ENV: &str = "MERETDD_LOG";

/// Install a stderr `tracing` subscriber filtered by `MERETDD_LOG`.
///
/// Defaults to `warn`. Calling it again, or after another subscriber was set,
/// does nothing.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
