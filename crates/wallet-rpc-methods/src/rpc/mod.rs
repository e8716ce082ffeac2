//! RPC method handlers for the wallet JSON-RPC API.

pub mod switch_chain;
pub mod sys_info;

pub use switch_chain::SwitchChainRpc;
pub use sys_info::SysInfoRpc;

use crate::domain::config::WalletRpcConfig;
use crate::domain::network::BuiltinNetworks;
use crate::ports::{ChainSwitchHooks, HardwareInfoProvider};
use std::sync::Arc;

/// All RPC handlers
pub struct RpcHandlers {
    pub switch_chain: SwitchChainRpc,
    pub sys_info: SysInfoRpc,
}

impl RpcHandlers {
    /// Create all RPC handlers from config and wallet collaborators
    pub fn new(
        config: &WalletRpcConfig,
        hooks: Arc<dyn ChainSwitchHooks>,
        hardware: Arc<dyn HardwareInfoProvider>,
        builtin: Arc<BuiltinNetworks>,
    ) -> Self {
        Self {
            switch_chain: SwitchChainRpc::new(config, hooks, builtin),
            sys_info: SysInfoRpc::new(hardware),
        }
    }
}
