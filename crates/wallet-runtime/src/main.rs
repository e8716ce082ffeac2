//! # Wallet Runtime
//!
//! Entry point for the wallet RPC service.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (env driven)
//! 2. Load configuration (file named by `WALLET_CONFIG`, then env overrides)
//! 3. Build the built-in network table and start on the default chain
//! 4. Wire network store, provider, approval queue and hardware source
//! 5. Serve until Ctrl+C, then cancel pending approvals and drain

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use wallet_rpc_methods::{
    ApprovalQueue, BuiltinNetworks, ChainId, InMemoryNetworkStore, ProcfsHardwareInfo,
    ProviderController, WalletHooks, WalletRpcConfig, WalletRpcService,
};
use wallet_telemetry::{init_telemetry, TelemetryConfig};

/// Everything the service needs, wired together.
struct WalletRuntime {
    service: WalletRpcService,
}

impl WalletRuntime {
    fn new(config: WalletRpcConfig) -> Result<Self> {
        let builtin = Arc::new(BuiltinNetworks::ethereum(&config.chains.infura_project_id));

        let default_chain = ChainId::parse_with_max(
            &config.chains.default_chain_id,
            config.chains.max_safe_chain_id,
        )
        .context("Invalid default chain id")?;
        let provider = ProviderController::with_default_chain(Arc::clone(&builtin), &default_chain)
            .context("Failed to select default network")?;

        let hooks = WalletHooks::new(
            Arc::new(InMemoryNetworkStore::new()),
            Arc::new(provider),
            Arc::new(ApprovalQueue::new()),
        );
        let hardware = Arc::new(ProcfsHardwareInfo::new(config.hardware.procfs_root.clone()));

        let service = WalletRpcService::new(config, builtin, hooks, hardware)
            .context("Failed to create wallet RPC service")?;

        Ok(Self { service })
    }

    async fn run(self) -> Result<()> {
        self.service
            .serve(shutdown_signal())
            .await
            .context("Wallet RPC service failed")
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received, shutting down"),
        Err(e) => error!(error = %e, "Failed to listen for Ctrl+C, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())?;

    let config = WalletRpcConfig::from_env().context("Failed to load configuration")?;

    info!("===========================================");
    info!("  Wallet RPC Runtime v{}", wallet_rpc_methods::VERSION);
    info!("===========================================");
    info!("RPC Addr: {}", config.http_addr());
    info!("Admin Addr: {}", config.admin_addr());
    info!("Default Chain: {}", config.chains.default_chain_id);

    let runtime = WalletRuntime::new(config)?;
    runtime.run().await?;

    info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_builds_from_defaults() {
        assert!(WalletRuntime::new(WalletRpcConfig::default()).is_ok());
    }

    #[test]
    fn test_runtime_rejects_unknown_default_chain() {
        let mut config = WalletRpcConfig::default();
        config.chains.default_chain_id = "0x539".into();
        assert!(WalletRuntime::new(config).is_err());
    }

    #[test]
    fn test_runtime_rejects_conflicting_ports() {
        let mut config = WalletRpcConfig::default();
        config.admin.port = config.http.port;
        assert!(WalletRuntime::new(config).is_err());
    }

    #[test]
    fn test_runtime_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.json");
        std::fs::write(
            &path,
            r#"{ "http": { "port": 18545 }, "chains": { "default_chain_id": "0x2a" } }"#,
        )
        .unwrap();

        let config = WalletRpcConfig::from_file(&path).unwrap();
        assert_eq!(config.http.port, 18545);
        assert!(WalletRuntime::new(config).is_ok());
    }
}
