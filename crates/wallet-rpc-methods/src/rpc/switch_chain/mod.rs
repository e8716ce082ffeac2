//! `wallet_switchEthereumChain`: switch the active network on request of an
//! origin, after the user approves.
//!
//! Pipeline: validate params, resolve the chain (built-in table, then custom
//! networks), await approval, apply the switch. Each stage either hands off
//! to the next or ends the request with an error; there are no retries.

pub mod approval;
pub mod executor;
pub mod resolver;

pub use approval::{ApprovalCoordinator, SwitchTarget};
pub use executor::SwitchExecutor;
pub use resolver::NetworkResolver;

use crate::domain::config::WalletRpcConfig;
use crate::domain::error::{ApiError, ApiResult};
use crate::domain::network::BuiltinNetworks;
use crate::domain::validation::validate_switch_chain_params;
use crate::ports::ChainSwitchHooks;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Chain switch handler
pub struct SwitchChainRpc {
    hooks: Arc<dyn ChainSwitchHooks>,
    resolver: NetworkResolver,
    approval: ApprovalCoordinator,
    executor: SwitchExecutor,
    max_safe_chain_id: u64,
    add_chain_method: String,
}

impl SwitchChainRpc {
    pub fn new(
        config: &WalletRpcConfig,
        hooks: Arc<dyn ChainSwitchHooks>,
        builtin: Arc<BuiltinNetworks>,
    ) -> Self {
        Self {
            hooks,
            resolver: NetworkResolver::new(Arc::clone(&builtin)),
            approval: ApprovalCoordinator::new(builtin, config.methods.switch_ethereum_chain.clone()),
            executor: SwitchExecutor::new(),
            max_safe_chain_id: config.chains.max_safe_chain_id,
            add_chain_method: config.methods.add_ethereum_chain.clone(),
        }
    }

    /// Handle a switch request from `origin`. Resolves to `()` (JSON `null`)
    /// once the new network is active.
    #[instrument(skip(self, params))]
    pub async fn switch_ethereum_chain(&self, origin: &str, params: Option<&Value>) -> ApiResult<()> {
        let request = validate_switch_chain_params(params, self.max_safe_chain_id)?;
        let chain_id = request.chain_id;

        let Some(network) = self.resolver.resolve(&chain_id, self.hooks.as_ref()) else {
            debug!(chain_id = %chain_id, "Unrecognized chain");
            return Err(ApiError::unrecognized_chain(
                &request.raw_chain_id,
                &self.add_chain_method,
            ));
        };

        // Already-active chains still go through approval
        let current = self.hooks.current_chain_id();
        debug!(
            chain_id = %chain_id,
            current_chain_id = current.as_ref().map(|c| c.as_str()),
            network_type = %network.network_type,
            "Requesting chain switch approval"
        );

        let target = self
            .approval
            .request_approval(self.hooks.as_ref(), origin, network)
            .await?;

        self.executor.apply(self.hooks.as_ref(), target).await
    }
}
