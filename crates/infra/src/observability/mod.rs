//! Tracing initialisation
//!
//! Installs a `tracing-subscriber` fmt subscriber filtered by `RUST_LOG`
//! (default `info`). Safe to call more than once; later calls are no-ops.

use std::str::FromStr;

use stocksync_domain::impl_domain_status_conversions;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, one line per event
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl_domain_status_conversions!(LogFormat {
    Pretty => "pretty",
    Json => "json",
});

impl LogFormat {
    /// Read from `STOCKSYNC_LOG_FORMAT`, falling back to pretty.
    pub fn from_env() -> Self {
        std::env::var("STOCKSYNC_LOG_FORMAT")
            .ok()
            .and_then(|value| Self::from_str(&value).ok())
            .unwrap_or_default()
    }
}

/// Initialize tracing/logging for the process.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(format: LogFormat) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}
