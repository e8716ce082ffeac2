//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for log output.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error, or a directive list)
    pub log_level: String,

    /// Whether to enable console output
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Include file and line in log lines
    pub source_location: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "wallet-rpc".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            source_location: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: wallet-rpc)
    /// - `WALLET_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `WALLET_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `WALLET_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    /// - `WALLET_LOG_SOURCE`: Include file/line (default: follows JSON logs)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();
        let json_logs = lookup("WALLET_JSON_LOGS")
            .map(|v| is_truthy(&v))
            .unwrap_or(is_container);

        Self {
            service_name: lookup("OTEL_SERVICE_NAME").unwrap_or_else(|| "wallet-rpc".to_string()),

            log_level: lookup("WALLET_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),

            console_output: lookup("WALLET_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs,

            source_location: lookup("WALLET_LOG_SOURCE")
                .map(|v| is_truthy(&v))
                .unwrap_or(json_logs),
        }
    }

    /// Quiet configuration for tests and tools.
    pub fn quiet() -> Self {
        Self {
            log_level: "warn".to_string(),
            console_output: false,
            ..Self::default()
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "wallet-rpc");
        assert_eq!(config.log_level, "info");
        assert!(config.console_output);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_empty_environment_matches_default() {
        let config = TelemetryConfig::from_lookup(lookup(&[]));
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
        assert!(!config.source_location);
    }

    #[test]
    fn test_wallet_level_wins_over_rust_log() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("WALLET_LOG_LEVEL", "debug"),
            ("RUST_LOG", "trace"),
        ]));
        assert_eq!(config.log_level, "debug");

        let config = TelemetryConfig::from_lookup(lookup(&[("RUST_LOG", "trace")]));
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_container_defaults_to_json() {
        let config = TelemetryConfig::from_lookup(lookup(&[("DOCKER_CONTAINER", "1")]));
        assert!(config.json_logs);
        assert!(config.source_location);

        let config = TelemetryConfig::from_lookup(lookup(&[
            ("DOCKER_CONTAINER", "1"),
            ("WALLET_JSON_LOGS", "false"),
        ]));
        assert!(!config.json_logs);
    }

    #[test]
    fn test_console_output_flag() {
        for off in ["false", "FALSE", "0"] {
            let config = TelemetryConfig::from_lookup(lookup(&[("WALLET_CONSOLE_OUTPUT", off)]));
            assert!(!config.console_output, "{off}");
        }
        let config = TelemetryConfig::from_lookup(lookup(&[("WALLET_CONSOLE_OUTPUT", "yes")]));
        assert!(config.console_output);
    }
}
