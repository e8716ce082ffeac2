//! `wallet_getSystemFingerprint`: a hash of the host's hardware.

use crate::domain::error::HardwareInfoError;
use crate::domain::fingerprint::{Fingerprint, SysInfoSample};
use crate::ports::HardwareInfoProvider;
use std::sync::Arc;
use tracing::{error, instrument};

/// System fingerprint handler
pub struct SysInfoRpc {
    hardware: Arc<dyn HardwareInfoProvider>,
}

impl SysInfoRpc {
    pub fn new(hardware: Arc<dyn HardwareInfoProvider>) -> Self {
        Self { hardware }
    }

    /// Never fails: any sampling error yields [`Fingerprint::NoSuccess`].
    #[instrument(skip(self))]
    pub async fn get_system_fingerprint(&self) -> Fingerprint {
        match self.sample().await {
            Ok(sample) => Fingerprint::Hash(sample.hash()),
            Err(e) => {
                error!(error = %e, "Failed to sample system information");
                Fingerprint::NoSuccess
            }
        }
    }

    async fn sample(&self) -> Result<SysInfoSample, HardwareInfoError> {
        let (cpu, memory, storage) = tokio::join!(
            self.hardware.cpu_info(),
            self.hardware.memory_info(),
            self.hardware.storage_info(),
        );

        Ok(SysInfoSample::new(&cpu?, &memory?, &storage?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockHardware;

    #[tokio::test]
    async fn test_fingerprint_known_hardware() {
        let rpc = SysInfoRpc::new(Arc::new(MockHardware::workstation()));
        assert_eq!(
            rpc.get_system_fingerprint().await,
            Fingerprint::Hash(4_411_044_084_306_154)
        );
    }

    #[tokio::test]
    async fn test_fingerprint_deterministic() {
        let rpc = SysInfoRpc::new(Arc::new(MockHardware::workstation()));
        let first = rpc.get_system_fingerprint().await;
        let second = rpc.get_system_fingerprint().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_storage_failure_yields_sentinel() {
        let mut hardware = MockHardware::workstation();
        hardware.fail_storage = true;
        let rpc = SysInfoRpc::new(Arc::new(hardware));

        assert_eq!(rpc.get_system_fingerprint().await, Fingerprint::NoSuccess);
    }

    #[tokio::test]
    async fn test_removable_storage_ignored() {
        let mut hardware = MockHardware::workstation();
        hardware.storage.pop();
        let rpc = SysInfoRpc::new(Arc::new(hardware));

        assert_eq!(
            rpc.get_system_fingerprint().await,
            Fingerprint::Hash(4_411_044_084_306_154)
        );
    }
}
