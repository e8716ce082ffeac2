//! Chain id to network descriptor resolution.

use crate::domain::chain_id::ChainId;
use crate::domain::network::{BuiltinNetworks, NetworkDescriptor};
use crate::ports::ChainSwitchHooks;
use std::sync::Arc;

/// Resolves chain ids against the built-in table first, then the custom
/// network store. Never switches anything.
pub struct NetworkResolver {
    builtin: Arc<BuiltinNetworks>,
}

impl NetworkResolver {
    pub fn new(builtin: Arc<BuiltinNetworks>) -> Self {
        Self { builtin }
    }

    /// `None` means the chain is unknown to the wallet.
    pub fn resolve(
        &self,
        chain_id: &ChainId,
        hooks: &dyn ChainSwitchHooks,
    ) -> Option<NetworkDescriptor> {
        self.builtin
            .descriptor(chain_id)
            .or_else(|| hooks.find_custom_network(chain_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::network::ProviderType;
    use crate::test_utils::MockHooks;

    fn chain(raw: &str) -> ChainId {
        ChainId::parse(raw).unwrap()
    }

    fn resolver() -> NetworkResolver {
        NetworkResolver::new(Arc::new(BuiltinNetworks::ethereum("test")))
    }

    #[test]
    fn test_builtin_hit_skips_store() {
        let hooks = MockHooks::new();
        let network = resolver().resolve(&chain("0x1"), &hooks).unwrap();

        assert_eq!(network.network_type, ProviderType::Mainnet);
        assert_eq!(network.nickname, "Ethereum Mainnet");
        assert!(hooks.calls().is_empty());
    }

    #[test]
    fn test_custom_lookup() {
        let bsc = NetworkDescriptor::custom(chain("0x38"), "BNB", "BSC", "https://bsc.example");
        let hooks = MockHooks::new().with_custom(bsc.clone());

        assert_eq!(resolver().resolve(&chain("0x38"), &hooks), Some(bsc));
        assert_eq!(hooks.calls(), vec!["find_custom_network:0x38"]);
    }

    #[test]
    fn test_unresolved() {
        let hooks = MockHooks::new();
        assert!(resolver().resolve(&chain("0x539"), &hooks).is_none());
    }

    #[test]
    fn test_resolution_has_no_side_effects() {
        let hooks = MockHooks::new();
        let resolver = resolver();
        for raw in ["0x1", "0x5", "0x539"] {
            let _ = resolver.resolve(&chain(raw), &hooks);
        }
        assert!(hooks
            .calls()
            .iter()
            .all(|c| c.starts_with("find_custom_network")));
        assert!(hooks.current.lock().is_none());
    }
}
