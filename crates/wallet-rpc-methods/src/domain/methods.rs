//! Method registry: which wallet methods exist and which hooks each needs.

use crate::domain::config::MethodsConfig;
use std::collections::HashMap;
use std::sync::LazyLock;

pub const SWITCH_ETHEREUM_CHAIN: &str = "wallet_switchEthereumChain";
pub const ADD_ETHEREUM_CHAIN: &str = "wallet_addEthereumChain";
pub const GET_SYSTEM_FINGERPRINT: &str = "wallet_getSystemFingerprint";

/// Wallet capability a method handler calls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    CurrentChainId,
    FindCustomNetwork,
    SetProviderType,
    UpdateRpcTarget,
    RequestUserApproval,
    HardwareInfo,
}

impl Hook {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hook::CurrentChainId => "getCurrentChainId",
            Hook::FindCustomNetwork => "findCustomRpcBy",
            Hook::SetProviderType => "setProviderType",
            Hook::UpdateRpcTarget => "updateRpcTarget",
            Hook::RequestUserApproval => "requestUserApproval",
            Hook::HardwareInfo => "hardwareInfo",
        }
    }
}

/// Which handler serves a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    SwitchEthereumChain,
    GetSystemFingerprint,
}

/// Method metadata
#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub kind: MethodKind,
    /// Default method name
    pub name: &'static str,
    /// Hooks the handler requires
    pub hooks: &'static [Hook],
    /// Does the method change wallet state?
    pub is_write: bool,
    pub description: &'static str,
}

/// Registry of supported methods by default name
pub static METHOD_REGISTRY: LazyLock<HashMap<&'static str, MethodInfo>> = LazyLock::new(|| {
    let methods = [
        MethodInfo {
            kind: MethodKind::SwitchEthereumChain,
            name: SWITCH_ETHEREUM_CHAIN,
            hooks: &[
                Hook::CurrentChainId,
                Hook::FindCustomNetwork,
                Hook::SetProviderType,
                Hook::UpdateRpcTarget,
                Hook::RequestUserApproval,
            ],
            is_write: true,
            description: "Switch the active network after user approval",
        },
        MethodInfo {
            kind: MethodKind::GetSystemFingerprint,
            name: GET_SYSTEM_FINGERPRINT,
            hooks: &[Hook::HardwareInfo],
            is_write: false,
            description: "Hash of CPU, memory and fixed storage information",
        },
    ];

    methods.into_iter().map(|m| (m.name, m)).collect()
});

fn info_for(kind: MethodKind) -> Option<&'static MethodInfo> {
    METHOD_REGISTRY.values().find(|m| m.kind == kind)
}

/// Configured method names mapped to their handlers.
///
/// Method names are configurable, so dispatch goes through this table
/// rather than matching on string literals.
#[derive(Debug, Clone)]
pub struct MethodTable {
    by_name: HashMap<String, MethodKind>,
}

impl MethodTable {
    pub fn from_config(config: &MethodsConfig) -> Self {
        let by_name = [
            (config.switch_ethereum_chain.clone(), MethodKind::SwitchEthereumChain),
            (config.system_fingerprint.clone(), MethodKind::GetSystemFingerprint),
        ]
        .into_iter()
        .collect();

        Self { by_name }
    }

    pub fn resolve(&self, method: &str) -> Option<MethodKind> {
        self.by_name.get(method).copied()
    }

    /// Configured name, metadata pairs, sorted by name
    pub fn entries(&self) -> Vec<(&str, &'static MethodInfo)> {
        let mut entries: Vec<_> = self
            .by_name
            .iter()
            .filter_map(|(name, kind)| info_for(*kind).map(|info| (name.as_str(), info)))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl Default for MethodTable {
    fn default() -> Self {
        Self::from_config(&MethodsConfig::default())
    }
}
