//! Mock collaborators shared by unit tests.

use crate::domain::approval::ApprovalRequest;
use crate::domain::chain_id::ChainId;
use crate::domain::error::{ApiError, ApiResult, HardwareInfoError};
use crate::domain::fingerprint::{CpuInfo, MemoryInfo, StorageType, StorageUnitInfo};
use crate::domain::network::{NetworkDescriptor, ProviderType};
use crate::ports::{ChainSwitchHooks, HardwareInfoProvider};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// What the mock approval authority answers
#[derive(Debug, Clone)]
pub enum ApprovalBehavior {
    /// Approve with the requested descriptor
    Approve,
    /// Approve with a different descriptor
    ApproveWith(NetworkDescriptor),
    Fail(ApiError),
}

/// Recording mock of the wallet hooks
pub struct MockHooks {
    pub current: Mutex<Option<ChainId>>,
    pub custom: Mutex<Vec<NetworkDescriptor>>,
    pub approval: Mutex<ApprovalBehavior>,
    pub update_error: Mutex<Option<ApiError>>,
    pub calls: Mutex<Vec<String>>,
    pub approvals: Mutex<Vec<ApprovalRequest>>,
    /// Simulated latency of `update_rpc_target`
    pub switch_delay: Duration,
    switching: AtomicBool,
    pub overlapped: AtomicBool,
}

impl MockHooks {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
            custom: Mutex::new(Vec::new()),
            approval: Mutex::new(ApprovalBehavior::Approve),
            update_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            approvals: Mutex::new(Vec::new()),
            switch_delay: Duration::ZERO,
            switching: AtomicBool::new(false),
            overlapped: AtomicBool::new(false),
        }
    }

    pub fn with_custom(self, network: NetworkDescriptor) -> Self {
        self.custom.lock().push(network);
        self
    }

    pub fn with_approval(self, behavior: ApprovalBehavior) -> Self {
        *self.approval.lock() = behavior;
        self
    }

    pub fn with_switch_delay(mut self, delay: Duration) -> Self {
        self.switch_delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl ChainSwitchHooks for MockHooks {
    fn current_chain_id(&self) -> Option<ChainId> {
        self.record("current_chain_id".into());
        self.current.lock().clone()
    }

    fn find_custom_network(&self, chain_id: &ChainId) -> Option<NetworkDescriptor> {
        self.record(format!("find_custom_network:{}", chain_id));
        self.custom
            .lock()
            .iter()
            .find(|n| &n.chain_id == chain_id)
            .cloned()
    }

    fn set_provider_type(&self, provider_type: ProviderType) -> ApiResult<()> {
        self.record(format!("set_provider_type:{}", provider_type));
        Ok(())
    }

    async fn update_rpc_target(&self, network: NetworkDescriptor) -> ApiResult<()> {
        if self.switching.swap(true, Ordering::SeqCst) {
            self.overlapped.store(true, Ordering::SeqCst);
        }
        self.record(format!("update_rpc_target:{}", network.chain_id));

        if !self.switch_delay.is_zero() {
            tokio::time::sleep(self.switch_delay).await;
        }

        let result = match self.update_error.lock().clone() {
            Some(err) => Err(err),
            None => {
                *self.current.lock() = Some(network.chain_id);
                Ok(())
            }
        };
        self.switching.store(false, Ordering::SeqCst);
        result
    }

    async fn request_user_approval(&self, request: ApprovalRequest) -> ApiResult<NetworkDescriptor> {
        self.record(format!("request_user_approval:{}", request.origin));
        self.approvals.lock().push(request.clone());

        let behavior = self.approval.lock().clone();
        match behavior {
            ApprovalBehavior::Approve => Ok(request.request_data),
            ApprovalBehavior::ApproveWith(network) => Ok(network),
            ApprovalBehavior::Fail(err) => Err(err),
        }
    }
}

/// Fixed hardware samples, optionally failing one query
pub struct MockHardware {
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    pub storage: Vec<StorageUnitInfo>,
    pub fail_storage: bool,
}

impl MockHardware {
    pub fn workstation() -> Self {
        Self {
            cpu: CpuInfo {
                model_name: "Intel(R) Core(TM) i7-8700 CPU @ 3.20GHz".to_string(),
                num_of_processors: 12,
                arch_name: "x86_64".to_string(),
            },
            memory: MemoryInfo {
                capacity: 16_672_321_536,
            },
            storage: vec![
                StorageUnitInfo {
                    name: "sda".to_string(),
                    storage_type: StorageType::Fixed,
                    capacity: 512_110_190_592,
                },
                StorageUnitInfo {
                    name: "sdb".to_string(),
                    storage_type: StorageType::Removable,
                    capacity: 32_010_928_128,
                },
            ],
            fail_storage: false,
        }
    }
}

#[async_trait]
impl HardwareInfoProvider for MockHardware {
    async fn cpu_info(&self) -> Result<CpuInfo, HardwareInfoError> {
        Ok(self.cpu.clone())
    }

    async fn memory_info(&self) -> Result<MemoryInfo, HardwareInfoError> {
        Ok(self.memory)
    }

    async fn storage_info(&self) -> Result<Vec<StorageUnitInfo>, HardwareInfoError> {
        if self.fail_storage {
            return Err(HardwareInfoError::Unsupported("storage query failed".into()));
        }
        Ok(self.storage.clone())
    }
}
