//! Domain types for the wallet RPC methods.
//!
//! Pure types, validation and hashing. Nothing here performs I/O.

pub mod approval;
pub mod chain_id;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod methods;
pub mod network;
pub mod validation;

pub use approval::{ApprovalRequest, PendingApproval};
pub use chain_id::{ChainId, ChainIdError, MAX_SAFE_CHAIN_ID};
pub use config::{ConfigError, WalletRpcConfig};
pub use error::{
    ApiError, ApiResult, ApprovalError, HardwareInfoError, ProviderError, ServiceError,
};
pub use fingerprint::{
    hash53, CpuInfo, Fingerprint, MemoryInfo, StorageType, StorageUnitInfo, SysInfoSample,
};
pub use methods::{Hook, MethodInfo, MethodKind, MethodTable};
pub use network::{BuiltinNetworks, NetworkDescriptor, ProviderType, RpcPrefs};
pub use validation::{validate_switch_chain_params, SwitchChainParams};
