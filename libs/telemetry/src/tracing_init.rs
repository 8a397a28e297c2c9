use std::sync::OnceLock;

use anyhow::Result;
use tracing_subscriber::layer::Layer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{DEFAULT_FILTER, TelemetryConfig};

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber once; later calls return `Ok(())` without touching it.
pub fn init_tracing(cfg: TelemetryConfig) -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let fmt_layer = if cfg.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let env_filter =
        EnvFilter::try_new(&cfg.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .ok();

    INIT.set(()).ok();
    tracing::debug!(
        target: "cardkit.telemetry",
        service = %cfg.service_name,
        version = %cfg.service_version,
        environment = %cfg.environment,
        "tracing installed"
    );
    Ok(())
}

pub fn is_installed() -> bool {
    INIT.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_a_no_op() {
        let cfg = TelemetryConfig::from_lookup("test", "0.0.0", |_| None);
        init_tracing(cfg.clone()).unwrap();
        assert!(is_installed());
        init_tracing(cfg).unwrap();
        assert!(is_installed());
    }
}
