//! Hardware information from Linux `/proc` and `/sys`.

use crate::domain::error::HardwareInfoError;
use crate::domain::fingerprint::{CpuInfo, MemoryInfo, StorageType, StorageUnitInfo};
use crate::ports::HardwareInfoProvider;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Size unit of `/sys/block/*/size`
const SECTOR_SIZE: u64 = 512;

/// Reads hardware samples below a configurable root (normally `/`)
#[derive(Debug, Clone)]
pub struct ProcfsHardwareInfo {
    root: PathBuf,
}

impl ProcfsHardwareInfo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read(&self, relative: &str) -> Result<String, HardwareInfoError> {
        read_file(&self.root.join(relative)).await
    }
}

impl Default for ProcfsHardwareInfo {
    fn default() -> Self {
        Self::new("/")
    }
}

async fn read_file(path: &Path) -> Result<String, HardwareInfoError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| HardwareInfoError::Io {
            path: path.display().to_string(),
            source,
        })
}

/// Split a `key : value` line from `/proc/cpuinfo`
fn cpuinfo_field(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

fn parse_cpuinfo(contents: &str) -> Result<(String, u32), HardwareInfoError> {
    let mut model_name = None;
    let mut processors = 0u32;

    for (key, value) in contents.lines().filter_map(cpuinfo_field) {
        match key {
            "processor" => processors += 1,
            // "Hardware" and "cpu model" on ARM and MIPS kernels
            "model name" | "Hardware" | "cpu model" if model_name.is_none() => {
                model_name = Some(value.to_string());
            }
            _ => {}
        }
    }

    if processors == 0 {
        return Err(HardwareInfoError::Parse {
            what: "cpuinfo",
            details: "no processor entries".into(),
        });
    }

    Ok((model_name.unwrap_or_default(), processors))
}

/// Parse a value from /proc/meminfo (e.g., "MemTotal:       16384 kB") into bytes
fn parse_meminfo_total(contents: &str) -> Result<u64, HardwareInfoError> {
    contents
        .lines()
        .find(|line| line.starts_with("MemTotal:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|kb| kb.parse::<u64>().ok())
        .and_then(|kb| kb.checked_mul(1024))
        .ok_or_else(|| HardwareInfoError::Parse {
            what: "meminfo",
            details: "missing, malformed or oversized MemTotal".into(),
        })
}

fn parse_number(contents: &str, what: &'static str) -> Result<u64, HardwareInfoError> {
    contents.trim().parse().map_err(|_| HardwareInfoError::Parse {
        what,
        details: format!("expected integer, got {:?}", contents.trim()),
    })
}

#[async_trait]
impl HardwareInfoProvider for ProcfsHardwareInfo {
    async fn cpu_info(&self) -> Result<CpuInfo, HardwareInfoError> {
        let contents = self.read("proc/cpuinfo").await?;
        let (model_name, num_of_processors) = parse_cpuinfo(&contents)?;

        Ok(CpuInfo {
            model_name,
            num_of_processors,
            arch_name: std::env::consts::ARCH.to_string(),
        })
    }

    async fn memory_info(&self) -> Result<MemoryInfo, HardwareInfoError> {
        let contents = self.read("proc/meminfo").await?;
        Ok(MemoryInfo {
            capacity: parse_meminfo_total(&contents)?,
        })
    }

    /// Physical block devices sorted by name. Virtual devices (no `device`
    /// link, e.g. loop and ram disks) are skipped.
    async fn storage_info(&self) -> Result<Vec<StorageUnitInfo>, HardwareInfoError> {
        let block_dir = self.root.join("sys/block");
        let mut entries =
            tokio::fs::read_dir(&block_dir)
                .await
                .map_err(|source| HardwareInfoError::Io {
                    path: block_dir.display().to_string(),
                    source,
                })?;

        let mut devices = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| HardwareInfoError::Io {
                path: block_dir.display().to_string(),
                source,
            })?
        {
            let path = entry.path();
            if !tokio::fs::try_exists(path.join("device")).await.unwrap_or(false) {
                continue;
            }
            devices.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
        devices.sort_by(|a, b| a.0.cmp(&b.0));

        let mut units = Vec::with_capacity(devices.len());
        for (name, path) in devices {
            let sectors = parse_number(&read_file(&path.join("size")).await?, "block size")?;
            let capacity = sectors
                .checked_mul(SECTOR_SIZE)
                .ok_or_else(|| HardwareInfoError::Parse {
                    what: "block size",
                    details: format!("{} sectors overflows a byte count", sectors),
                })?;
            let storage_type = match read_file(&path.join("removable")).await {
                Ok(flag) => match flag.trim() {
                    "0" => StorageType::Fixed,
                    "1" => StorageType::Removable,
                    _ => StorageType::Unknown,
                },
                Err(_) => StorageType::Unknown,
            };

            units.push(StorageUnitInfo {
                name,
                storage_type,
                capacity,
            });
        }

        Ok(units)
    }
}
