//! Tracing setup: structured JSON logging and event helpers.

pub mod events;

use consent_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "CONSENT_LOG";

/// Install a JSON subscriber filtered by `CONSENT_LOG`, or `info` if unset.
///
/// Returns false if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init()
        .is_ok()
}

/// Install a JSON subscriber with an explicit filter string.
pub fn init_tracing_with_filter(filter: &str) -> bool {
    let filter = EnvFilter::new(filter);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}

/// `CONSENT_LOG` wins over the configured level when set.
pub fn init_from_config(config: &ObservabilityConfig) -> bool {
    match std::env::var(LOG_ENV_VAR) {
        Ok(_) => init_tracing(),
        Err(_) => init_tracing_with_filter(&config.log_level),
    }
}
