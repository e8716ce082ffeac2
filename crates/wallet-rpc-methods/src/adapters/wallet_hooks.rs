//! [`ChainSwitchHooks`] backed by the in-process wallet adapters.

use crate::adapters::approval_queue::ApprovalQueue;
use crate::adapters::network_store::InMemoryNetworkStore;
use crate::adapters::provider::ProviderController;
use crate::domain::approval::ApprovalRequest;
use crate::domain::chain_id::ChainId;
use crate::domain::error::ApiResult;
use crate::domain::network::{NetworkDescriptor, ProviderType};
use crate::ports::ChainSwitchHooks;
use async_trait::async_trait;
use std::sync::Arc;

/// Wires the network store, provider controller and approval queue together
#[derive(Clone)]
pub struct WalletHooks {
    networks: Arc<InMemoryNetworkStore>,
    provider: Arc<ProviderController>,
    approvals: Arc<ApprovalQueue>,
}

impl WalletHooks {
    pub fn new(
        networks: Arc<InMemoryNetworkStore>,
        provider: Arc<ProviderController>,
        approvals: Arc<ApprovalQueue>,
    ) -> Self {
        Self {
            networks,
            provider,
            approvals,
        }
    }

    pub fn networks(&self) -> Arc<InMemoryNetworkStore> {
        Arc::clone(&self.networks)
    }

    pub fn provider(&self) -> Arc<ProviderController> {
        Arc::clone(&self.provider)
    }

    pub fn approvals(&self) -> Arc<ApprovalQueue> {
        Arc::clone(&self.approvals)
    }
}

#[async_trait]
impl ChainSwitchHooks for WalletHooks {
    fn current_chain_id(&self) -> Option<ChainId> {
        self.provider.current_chain_id()
    }

    fn find_custom_network(&self, chain_id: &ChainId) -> Option<NetworkDescriptor> {
        self.networks.find_by_chain_id(chain_id)
    }

    fn set_provider_type(&self, provider_type: ProviderType) -> ApiResult<()> {
        Ok(self.provider.set_provider_type(provider_type)?)
    }

    async fn update_rpc_target(&self, network: NetworkDescriptor) -> ApiResult<()> {
        Ok(self.provider.set_rpc_target(network)?)
    }

    async fn request_user_approval(&self, request: ApprovalRequest) -> ApiResult<NetworkDescriptor> {
        Ok(self.approvals.request(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::WalletRpcConfig;
    use crate::domain::error::codes;
    use crate::domain::network::BuiltinNetworks;
    use crate::rpc::SwitchChainRpc;
    use serde_json::json;
    use std::time::Duration;

    fn setup() -> (WalletHooks, Arc<SwitchChainRpc>) {
        let builtin = Arc::new(BuiltinNetworks::ethereum("test"));
        let provider = ProviderController::with_default_chain(
            Arc::clone(&builtin),
            &ChainId::parse("0x1").unwrap(),
        )
        .unwrap();
        let networks = InMemoryNetworkStore::with_networks([NetworkDescriptor::custom(
            ChainId::parse("0x89").unwrap(),
            "MATIC",
            "Polygon",
            "https://polygon.example",
        )]);
        let hooks = WalletHooks::new(
            Arc::new(networks),
            Arc::new(provider),
            Arc::new(ApprovalQueue::new()),
        );
        let rpc = SwitchChainRpc::new(&WalletRpcConfig::default(), Arc::new(hooks.clone()), builtin);
        (hooks, Arc::new(rpc))
    }

    async fn first_pending(queue: &ApprovalQueue) -> uuid::Uuid {
        for _ in 0..100 {
            if let Some(p) = queue.pending().first() {
                return p.id;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("no pending approval");
    }

    #[tokio::test]
    async fn test_approved_custom_switch() {
        let (hooks, rpc) = setup();
        let call = tokio::spawn(async move {
            rpc.switch_ethereum_chain("https://dapp.example", Some(&json!([{ "chainId": "0x89" }])))
                .await
        });

        let id = first_pending(&hooks.approvals).await;
        hooks.approvals.approve(id, None).unwrap();
        call.await.unwrap().unwrap();

        let active = hooks.provider.snapshot().unwrap();
        assert_eq!(active.provider_type, ProviderType::Rpc);
        assert_eq!(active.network.nickname, "Polygon");
    }

    #[tokio::test]
    async fn test_rejected_switch() {
        let (hooks, rpc) = setup();
        let call = tokio::spawn(async move {
            rpc.switch_ethereum_chain("https://dapp.example", Some(&json!([{ "chainId": "0x5" }])))
                .await
        });

        let id = first_pending(&hooks.approvals).await;
        hooks.approvals.reject(id).unwrap();
        let err = call.await.unwrap().unwrap_err();

        assert_eq!(err.code, codes::USER_REJECTED);
        assert_eq!(hooks.provider.current_chain_id().unwrap().as_str(), "0x1");
    }
}
