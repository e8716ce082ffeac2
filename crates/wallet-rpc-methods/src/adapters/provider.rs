//! Active provider configuration.

use crate::domain::chain_id::ChainId;
use crate::domain::error::ProviderError;
use crate::domain::network::{BuiltinNetworks, NetworkDescriptor, ProviderType};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// The network the wallet currently talks to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub provider_type: ProviderType,
    pub network: NetworkDescriptor,
}

/// Holds the active provider configuration.
///
/// The configuration is only ever replaced as a whole, so readers never see
/// a half-applied switch.
pub struct ProviderController {
    builtin: Arc<BuiltinNetworks>,
    active: RwLock<Option<ProviderConfig>>,
    switches: AtomicU64,
}

impl ProviderController {
    pub fn new(builtin: Arc<BuiltinNetworks>) -> Self {
        Self {
            builtin,
            active: RwLock::new(None),
            switches: AtomicU64::new(0),
        }
    }

    /// Start on a built-in network
    pub fn with_default_chain(
        builtin: Arc<BuiltinNetworks>,
        chain_id: &ChainId,
    ) -> Result<Self, ProviderError> {
        let network = builtin
            .descriptor(chain_id)
            .ok_or_else(|| ProviderError::NotBuiltin(chain_id.to_string()))?;
        let controller = Self::new(builtin);
        *controller.active.write() = Some(ProviderConfig {
            provider_type: network.network_type,
            network,
        });
        Ok(controller)
    }

    /// Switch to a built-in network
    pub fn set_provider_type(&self, provider_type: ProviderType) -> Result<(), ProviderError> {
        let network = self
            .builtin
            .iter()
            .find(|(_, n)| n.provider_type == provider_type)
            .and_then(|(chain_id, _)| self.builtin.descriptor(chain_id))
            .ok_or_else(|| ProviderError::UnknownProviderType(provider_type.to_string()))?;

        self.replace(ProviderConfig {
            provider_type,
            network,
        });
        Ok(())
    }

    /// Switch to a custom RPC endpoint
    pub fn set_rpc_target(&self, network: NetworkDescriptor) -> Result<(), ProviderError> {
        if network.rpc_url.trim().is_empty() {
            return Err(ProviderError::SwitchFailed(format!(
                "network {} has no RPC URL",
                network.chain_id
            )));
        }

        self.replace(ProviderConfig {
            provider_type: ProviderType::Rpc,
            network,
        });
        Ok(())
    }

    fn replace(&self, config: ProviderConfig) {
        info!(
            chain_id = %config.network.chain_id,
            provider_type = %config.provider_type,
            rpc_url = %config.network.rpc_url,
            "Active provider changed"
        );
        *self.active.write() = Some(config);
        self.switches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn current_chain_id(&self) -> Option<ChainId> {
        self.active.read().as_ref().map(|c| c.network.chain_id.clone())
    }

    pub fn snapshot(&self) -> Option<ProviderConfig> {
        self.active.read().clone()
    }

    /// Number of switches applied since startup
    pub fn switch_count(&self) -> u64 {
        self.switches.load(Ordering::Relaxed)
    }
}
