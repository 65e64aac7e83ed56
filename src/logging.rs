//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never interleave with the editor's raw-mode
//! output on stdout. The filter comes from `LSH_LOG` using `EnvFilter`
//! directive syntax (`debug`, `lsh::completion=trace`, ...).

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "LSH_LOG";

/// Filter used when `LSH_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter from an optional directive string.
pub fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init() {
    let directives = std::env::var(LOG_ENV_VAR).ok();
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter_from(directives.as_deref()))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .try_init();
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
