//! User approval step of a chain switch.

use crate::domain::approval::ApprovalRequest;
use crate::domain::error::ApiResult;
use crate::domain::network::{BuiltinNetworks, NetworkDescriptor, ProviderType};
use crate::ports::ChainSwitchHooks;
use std::sync::Arc;
use tracing::debug;

/// What to switch to once the user has approved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchTarget {
    /// Built-in network, switched by provider type
    Builtin(ProviderType),
    /// Custom network, installed as the full descriptor
    Custom(NetworkDescriptor),
}

/// Requests approval from the wallet's approval authority
pub struct ApprovalCoordinator {
    builtin: Arc<BuiltinNetworks>,
    request_type: String,
}

impl ApprovalCoordinator {
    pub fn new(builtin: Arc<BuiltinNetworks>, request_type: impl Into<String>) -> Self {
        Self {
            builtin,
            request_type: request_type.into(),
        }
    }

    /// Await the user's decision.
    ///
    /// Errors from the authority are returned unchanged. On approval the
    /// returned descriptor's chain id picks the switch path.
    pub async fn request_approval(
        &self,
        hooks: &dyn ChainSwitchHooks,
        origin: &str,
        network: NetworkDescriptor,
    ) -> ApiResult<SwitchTarget> {
        let request = ApprovalRequest {
            origin: origin.to_string(),
            request_type: self.request_type.clone(),
            request_data: network,
        };

        let approved = hooks.request_user_approval(request).await.map_err(|e| {
            debug!(origin, code = e.code, "Chain switch not approved");
            e
        })?;

        Ok(match self.builtin.provider_type(&approved.chain_id) {
            Some(provider_type) => SwitchTarget::Builtin(provider_type),
            None => SwitchTarget::Custom(approved),
        })
    }
}
