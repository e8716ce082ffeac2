//! Hardware fingerprint: sample concatenation and the 53-bit mixing hash.

use serde::{Deserialize, Serialize, Serializer};

/// Sentinel returned in place of a fingerprint when sampling fails
pub const NO_SUCCESS: &str = "NO_SUCCESS";

/// CPU sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuInfo {
    pub model_name: String,
    pub num_of_processors: u32,
    pub arch_name: String,
}

/// Memory sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryInfo {
    /// Total capacity in bytes
    pub capacity: u64,
}

/// Storage device type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    Fixed,
    Removable,
    Unknown,
}

/// One storage device as reported by the hardware-info provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageUnitInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub storage_type: StorageType,
    /// Capacity in bytes
    pub capacity: u64,
}

/// Concatenable text extracted from the three hardware samples
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SysInfoSample {
    pub cpu_raw: String,
    pub memory_raw: String,
    pub storage_raw: String,
}

impl SysInfoSample {
    /// Build the sample text. Only fixed storage devices contribute, in
    /// reporting order.
    pub fn new(cpu: &CpuInfo, memory: &MemoryInfo, storage: &[StorageUnitInfo]) -> Self {
        let cpu_raw = format!("{}{}{}", cpu.model_name, cpu.num_of_processors, cpu.arch_name);
        let memory_raw = memory.capacity.to_string();
        let storage_raw = storage
            .iter()
            .filter(|unit| unit.storage_type == StorageType::Fixed)
            .map(|unit| format!("{}{}", unit.name, unit.capacity))
            .collect();

        Self {
            cpu_raw,
            memory_raw,
            storage_raw,
        }
    }

    /// Full text fed to the hash
    pub fn concat(&self) -> String {
        format!("{}{}{}", self.cpu_raw, self.memory_raw, self.storage_raw)
    }

    pub fn hash(&self) -> u64 {
        hash53(&self.concat(), 0)
    }
}

/// Two-lane 32-bit mixing hash producing a value below 2^53.
///
/// Operates on UTF-16 code units so the output matches browser clients
/// computing the same fingerprint.
pub fn hash53(input: &str, seed: u32) -> u64 {
    let mut h1: u32 = 0xdead_beef ^ seed;
    let mut h2: u32 = 0x41c6_ce57 ^ seed;

    for ch in input.encode_utf16() {
        let ch = u32::from(ch);
        h1 = (h1 ^ ch).wrapping_mul(2_654_435_761);
        h2 = (h2 ^ ch).wrapping_mul(1_597_334_677);
    }

    h1 = (h1 ^ (h1 >> 16)).wrapping_mul(2_246_822_507) ^ (h2 ^ (h2 >> 13)).wrapping_mul(3_266_489_909);
    h2 = (h2 ^ (h2 >> 16)).wrapping_mul(2_246_822_507) ^ (h1 ^ (h1 >> 13)).wrapping_mul(3_266_489_909);

    (u64::from(h2 & 0x1f_ffff) << 32) | u64::from(h1)
}

/// Result of a fingerprint computation.
///
/// Serializes as a JSON integer, or as the `"NO_SUCCESS"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fingerprint {
    Hash(u64),
    NoSuccess,
}

impl Serialize for Fingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Fingerprint::Hash(h) => serializer.serialize_u64(*h),
            Fingerprint::NoSuccess => serializer.serialize_str(NO_SUCCESS),
        }
    }
}
