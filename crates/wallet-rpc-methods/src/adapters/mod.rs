//! Adapters implementing the outbound ports.

pub mod approval_queue;
pub mod network_store;
pub mod procfs;
pub mod provider;
pub mod wallet_hooks;

pub use approval_queue::{ApprovalQueue, ApprovalStatsSnapshot};
pub use network_store::InMemoryNetworkStore;
pub use procfs::ProcfsHardwareInfo;
pub use provider::{ProviderConfig, ProviderController};
pub use wallet_hooks::WalletHooks;
