//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use cbie_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log level.
pub const LOG_ENV_VAR: &str = "CBIE_LOG";

/// `CBIE_LOG` if set and parseable, else the configured level, else `info`.
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns `false` when one is already set.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = build_filter(config);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json_logs {
        builder
            .json()
            .with_file(true)
            .with_line_number(true)
            .try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}
