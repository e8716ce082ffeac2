//! Applies an approved switch to the active provider.

use crate::domain::error::ApiResult;
use crate::ports::ChainSwitchHooks;
use crate::rpc::switch_chain::approval::SwitchTarget;
use tokio::sync::Mutex;
use tracing::info;

/// Serializes provider switches: at most one is in flight.
#[derive(Default)]
pub struct SwitchExecutor {
    lock: Mutex<()>,
}

impl SwitchExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn apply(&self, hooks: &dyn ChainSwitchHooks, target: SwitchTarget) -> ApiResult<()> {
        // Held across the whole switch, including the async RPC target update
        let _guard = self.lock.lock().await;

        match target {
            SwitchTarget::Builtin(provider_type) => {
                hooks.set_provider_type(provider_type)?;
                info!(provider_type = %provider_type, "Switched to built-in network");
            }
            SwitchTarget::Custom(network) => {
                let chain_id = network.chain_id.clone();
                hooks.update_rpc_target(network).await?;
                info!(chain_id = %chain_id, "Switched to custom network");
            }
        }

        Ok(())
    }
}
