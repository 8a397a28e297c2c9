//! Logging setup shared by cardkit binaries.
//!
//! `install` wires a global `tracing` subscriber from the environment: `RUST_LOG` for the
//! filter, `LOG_FORMAT` for JSON or human output, `OTEL_SERVICE_NAME` for the service name.

use anyhow::Result;

mod config;
mod tracing_init;

pub use config::{DEFAULT_FILTER, TelemetryConfig};
pub use tracing_init::{init_tracing, is_installed};

/// Installs the subscriber configured from `RUST_LOG`, `LOG_FORMAT` and `OTEL_SERVICE_NAME`.
pub fn install(service_name: &str) -> Result<()> {
    init_tracing(TelemetryConfig::from_env(
        service_name,
        env!("CARGO_PKG_VERSION"),
    ))
}
