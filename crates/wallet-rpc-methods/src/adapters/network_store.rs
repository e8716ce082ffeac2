//! In-memory store of user-added networks.

use crate::domain::chain_id::ChainId;
use crate::domain::network::NetworkDescriptor;
use parking_lot::RwLock;
use tracing::debug;

/// Custom networks keyed by chain id, in insertion order
#[derive(Default)]
pub struct InMemoryNetworkStore {
    networks: RwLock<Vec<NetworkDescriptor>>,
}

impl InMemoryNetworkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_networks(networks: impl IntoIterator<Item = NetworkDescriptor>) -> Self {
        let store = Self::new();
        for network in networks {
            store.upsert(network);
        }
        store
    }

    /// Insert a network, replacing any existing entry with the same chain id.
    ///
    /// Returns the replaced entry.
    pub fn upsert(&self, network: NetworkDescriptor) -> Option<NetworkDescriptor> {
        let mut networks = self.networks.write();
        debug!(chain_id = %network.chain_id, nickname = %network.nickname, "Storing custom network");

        match networks.iter_mut().find(|n| n.chain_id == network.chain_id) {
            Some(existing) => Some(std::mem::replace(existing, network)),
            None => {
                networks.push(network);
                None
            }
        }
    }

    pub fn remove(&self, chain_id: &ChainId) -> Option<NetworkDescriptor> {
        let mut networks = self.networks.write();
        let index = networks.iter().position(|n| &n.chain_id == chain_id)?;
        Some(networks.remove(index))
    }

    /// First network matching `predicate`
    pub fn find_by<F>(&self, predicate: F) -> Option<NetworkDescriptor>
    where
        F: Fn(&NetworkDescriptor) -> bool,
    {
        self.networks.read().iter().find(|n| predicate(n)).cloned()
    }

    pub fn find_by_chain_id(&self, chain_id: &ChainId) -> Option<NetworkDescriptor> {
        self.find_by(|n| &n.chain_id == chain_id)
    }

    pub fn list(&self) -> Vec<NetworkDescriptor> {
        self.networks.read().clone()
    }

    pub fn len(&self) -> usize {
        self.networks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(raw: &str, nickname: &str) -> NetworkDescriptor {
        NetworkDescriptor::custom(ChainId::parse(raw).unwrap(), "TST", nickname, "https://rpc.example")
    }

    #[test]
    fn test_upsert_replaces_same_chain() {
        let store = InMemoryNetworkStore::new();
        assert!(store.upsert(network("0x89", "Polygon")).is_none());
        let replaced = store.upsert(network("0x89", "Polygon Mainnet")).unwrap();

        assert_eq!(replaced.nickname, "Polygon");
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.find_by_chain_id(&ChainId::parse("0x89").unwrap()).unwrap().nickname,
            "Polygon Mainnet"
        );
    }

    #[test]
    fn test_find_by_predicate() {
        let store = InMemoryNetworkStore::with_networks([
            network("0x89", "Polygon"),
            network("0x38", "BSC"),
        ]);

        let found = store.find_by(|n| n.nickname == "BSC").unwrap();
        assert_eq!(found.chain_id.as_str(), "0x38");
        assert!(store.find_by(|n| n.ticker == "ETH").is_none());
    }

    #[test]
    fn test_remove_and_list_order() {
        let store = InMemoryNetworkStore::with_networks([
            network("0x89", "Polygon"),
            network("0x38", "BSC"),
            network("0xa", "Optimism"),
        ]);

        assert!(store.remove(&ChainId::parse("0x38").unwrap()).is_some());
        assert!(store.remove(&ChainId::parse("0x38").unwrap()).is_none());

        let names: Vec<_> = store.list().into_iter().map(|n| n.nickname).collect();
        assert_eq!(names, vec!["Polygon", "Optimism"]);
    }
}
