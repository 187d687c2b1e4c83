//! # cbie-observability
//!
//! Subscriber initialisation from [`ObservabilityConfig`](cbie_core::config::ObservabilityConfig),
//! span macros for each analysis stage, and structured events for the
//! outcomes operators care about.

pub mod tracing_setup;

pub use tracing_setup::{build_filter, init_tracing, LOG_ENV_VAR};
