//! Wallet JSON-RPC methods: user-approved chain switching and a hardware
//! fingerprint.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        WALLET RPC METHODS                        │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐                          ┌─────────────┐        │
//! │  │  JSON-RPC   │                          │    Admin    │        │
//! │  │  Port 8545  │                          │  Port 8080  │        │
//! │  └──────┬──────┘                          └──────┬──────┘        │
//! │         │                                        │               │
//! │  ┌──────┴──────────────────────────┐             │               │
//! │  │  Router (batch, id checks)      │             │               │
//! │  └──────┬──────────────────┬───────┘             │               │
//! │         │                  │                     │               │
//! │  ┌──────┴───────────┐ ┌────┴──────────┐          │               │
//! │  │  SwitchChainRpc  │ │  SysInfoRpc   │          │               │
//! │  │ validate→resolve │ │ join samples  │          │               │
//! │  │ →approve→switch  │ │ → hash53      │          │               │
//! │  └──────┬───────────┘ └────┬──────────┘          │               │
//! └─────────┼──────────────────┼─────────────────────┼───────────────┘
//!           │ ChainSwitchHooks │ HardwareInfoProvider│
//!           ▼                  ▼                     ▼
//!   network store, provider,  /proc, /sys      approval decisions
//!   approval queue
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use wallet_rpc_methods::{WalletRpcConfig, WalletRpcService};
//!
//! let config = WalletRpcConfig::from_env()?;
//! let service = WalletRpcService::new(config, builtin, hooks, hardware)?;
//! service.serve(shutdown_signal).await?;
//! ```
//!
//! # Security
//!
//! - Every chain switch requires an explicit user approval
//! - Parameter objects with unexpected keys are rejected before any lookup
//! - Chain ids above the safe ceiling are rejected
//! - The admin server binds to localhost by default

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod middleware;
pub mod ports;
pub mod router;
pub mod rpc;
pub mod service;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-exports for public API
pub use adapters::{
    ApprovalQueue, InMemoryNetworkStore, ProcfsHardwareInfo, ProviderConfig, ProviderController,
    WalletHooks,
};
pub use domain::config::WalletRpcConfig;
pub use domain::error::{ApiError, ApiResult, ServiceError};
pub use domain::{
    BuiltinNetworks, ChainId, Fingerprint, NetworkDescriptor, ProviderType,
};
pub use middleware::RpcMetrics;
pub use ports::{ChainSwitchHooks, HardwareInfoProvider};
pub use service::WalletRpcService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
