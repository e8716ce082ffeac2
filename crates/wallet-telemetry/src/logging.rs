//! Structured logging via `tracing-subscriber`.
//!
//! JSON output carries `timestamp`, `level`, `target`, span fields and the
//! event fields, so it can be shipped as-is to a log aggregator.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Parse the configured level into a filter.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("log level {:?}: {}", config.log_level, e)))
}

/// Install the global subscriber.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    let json_layer = (config.console_output && config.json_logs).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(config.source_location)
            .with_line_number(config.source_location)
    });

    let fmt_layer = (config.console_output && !config.json_logs).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .with_ansi(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        level = %config.log_level,
        json = config.json_logs,
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_directives() {
        let mut config = TelemetryConfig::default();
        config.log_level = "warn,wallet_rpc_methods=debug,tower_http=trace".into();
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn test_filter_rejects_bad_level() {
        let mut config = TelemetryConfig::default();
        config.log_level = "wallet_rpc_methods=loud".into();
        assert!(matches!(build_filter(&config), Err(TelemetryError::Config(_))));
    }
}
