//! Outbound ports: wallet capabilities the method handlers call into.

use crate::domain::approval::ApprovalRequest;
use crate::domain::chain_id::ChainId;
use crate::domain::error::{ApiResult, HardwareInfoError};
use crate::domain::fingerprint::{CpuInfo, MemoryInfo, StorageUnitInfo};
use crate::domain::network::{NetworkDescriptor, ProviderType};
use async_trait::async_trait;

/// Everything the chain switch handler needs from the wallet.
///
/// Implementations own the custom network store, the active provider
/// configuration and the approval authority.
#[async_trait]
pub trait ChainSwitchHooks: Send + Sync {
    /// Chain id of the active provider, if any
    fn current_chain_id(&self) -> Option<ChainId>;

    /// Look up a user-added network by chain id
    fn find_custom_network(&self, chain_id: &ChainId) -> Option<NetworkDescriptor>;

    /// Switch to a built-in network by provider type
    fn set_provider_type(&self, provider_type: ProviderType) -> ApiResult<()>;

    /// Switch to a custom network, replacing the whole active descriptor
    async fn update_rpc_target(&self, network: NetworkDescriptor) -> ApiResult<()>;

    /// Ask the user to approve a request.
    ///
    /// Resolves with the approved descriptor, or with the authority's error
    /// (which is returned to the requester verbatim).
    async fn request_user_approval(&self, request: ApprovalRequest) -> ApiResult<NetworkDescriptor>;
}

/// Source of hardware samples for the system fingerprint
#[async_trait]
pub trait HardwareInfoProvider: Send + Sync {
    async fn cpu_info(&self) -> Result<CpuInfo, HardwareInfoError>;

    async fn memory_info(&self) -> Result<MemoryInfo, HardwareInfoError>;

    /// Storage devices in reporting order
    async fn storage_info(&self) -> Result<Vec<StorageUnitInfo>, HardwareInfoError>;
}
