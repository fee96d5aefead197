//! Diagnostic logging
//!
//! Installs a `tracing` subscriber writing human-readable lines to stderr.
//! The filter comes from `PLANNER_LOG` (e.g. `planner=debug`); stdout stays
//! reserved for command output and exports.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "PLANNER_LOG";

const DEFAULT_FILTER: &str = "planner=warn";

/// Install the global subscriber; later calls are no-ops
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
