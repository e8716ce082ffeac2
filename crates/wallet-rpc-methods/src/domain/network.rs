//! Network descriptors and the built-in network table.

use crate::domain::chain_id::ChainId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ticker shared by every built-in network
pub const ETH_SYMBOL: &str = "ETH";

/// Provider type: a symbolic tag for a built-in network's connection
/// profile, or `rpc` for a custom endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Mainnet,
    Ropsten,
    Rinkeby,
    Goerli,
    Kovan,
    /// Custom RPC endpoint
    #[default]
    Rpc,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Mainnet => "mainnet",
            ProviderType::Ropsten => "ropsten",
            ProviderType::Rinkeby => "rinkeby",
            ProviderType::Goerli => "goerli",
            ProviderType::Kovan => "kovan",
            ProviderType::Rpc => "rpc",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional RPC preferences attached to a network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcPrefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_explorer_url: Option<String>,
}

/// A network the wallet can switch to: built-in or user-added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    pub chain_id: ChainId,
    pub ticker: String,
    pub nickname: String,
    pub rpc_url: String,
    #[serde(rename = "type", default)]
    pub network_type: ProviderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_prefs: Option<RpcPrefs>,
}

impl NetworkDescriptor {
    /// Descriptor for a custom (user-added) network
    pub fn custom(
        chain_id: ChainId,
        ticker: impl Into<String>,
        nickname: impl Into<String>,
        rpc_url: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            ticker: ticker.into(),
            nickname: nickname.into(),
            rpc_url: rpc_url.into(),
            network_type: ProviderType::Rpc,
            rpc_prefs: None,
        }
    }

    /// Attach a block explorer preference
    pub fn with_block_explorer(mut self, url: impl Into<String>) -> Self {
        self.rpc_prefs = Some(RpcPrefs {
            block_explorer_url: Some(url.into()),
        });
        self
    }

    pub fn block_explorer_url(&self) -> Option<&str> {
        self.rpc_prefs
            .as_ref()
            .and_then(|p| p.block_explorer_url.as_deref())
    }
}

/// Static metadata for one built-in network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinNetwork {
    pub provider_type: ProviderType,
    pub nickname: String,
    pub rpc_url: String,
}

/// Immutable table of built-in networks keyed by chain id.
///
/// Injected into the chain-switch handler at construction so tests can
/// substitute synthetic tables.
#[derive(Debug, Clone, Default)]
pub struct BuiltinNetworks {
    networks: BTreeMap<ChainId, BuiltinNetwork>,
}

impl BuiltinNetworks {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard Ethereum networks served through Infura
    pub fn ethereum(infura_project_id: &str) -> Self {
        let entries = [
            (1u64, ProviderType::Mainnet, "Ethereum Mainnet"),
            (3, ProviderType::Ropsten, "Ropsten"),
            (4, ProviderType::Rinkeby, "Rinkeby"),
            (5, ProviderType::Goerli, "Goerli"),
            (42, ProviderType::Kovan, "Kovan"),
        ];

        entries
            .into_iter()
            .filter_map(|(id, provider_type, nickname)| {
                let chain_id = ChainId::from_u64(id).ok()?;
                let rpc_url = format!(
                    "https://{}.infura.io/v3/{}",
                    provider_type.as_str(),
                    infura_project_id
                );
                Some((chain_id, provider_type, nickname.to_string(), rpc_url))
            })
            .fold(Self::new(), |table, (chain_id, provider_type, nickname, rpc_url)| {
                table.with_network(chain_id, provider_type, nickname, rpc_url)
            })
    }

    /// Builder-style insert
    pub fn with_network(
        mut self,
        chain_id: ChainId,
        provider_type: ProviderType,
        nickname: impl Into<String>,
        rpc_url: impl Into<String>,
    ) -> Self {
        self.networks.insert(
            chain_id,
            BuiltinNetwork {
                provider_type,
                nickname: nickname.into(),
                rpc_url: rpc_url.into(),
            },
        );
        self
    }

    pub fn get(&self, chain_id: &ChainId) -> Option<&BuiltinNetwork> {
        self.networks.get(chain_id)
    }

    pub fn provider_type(&self, chain_id: &ChainId) -> Option<ProviderType> {
        self.get(chain_id).map(|n| n.provider_type)
    }

    /// Synthesize the descriptor for a built-in chain
    pub fn descriptor(&self, chain_id: &ChainId) -> Option<NetworkDescriptor> {
        self.get(chain_id).map(|network| NetworkDescriptor {
            chain_id: chain_id.clone(),
            ticker: ETH_SYMBOL.to_string(),
            nickname: network.nickname.clone(),
            rpc_url: network.rpc_url.clone(),
            network_type: network.provider_type,
            rpc_prefs: None,
        })
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChainId, &BuiltinNetwork)> {
        self.networks.iter()
    }
}
