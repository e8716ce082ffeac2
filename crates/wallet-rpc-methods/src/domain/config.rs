//! Wallet RPC configuration with validation.

use crate::domain::chain_id::{ChainId, MAX_SAFE_CHAIN_ID};
use crate::domain::methods;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletRpcConfig {
    /// JSON-RPC HTTP server
    pub http: HttpConfig,
    /// Admin server (approvals, metrics). Localhost only by default.
    pub admin: AdminConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Method names
    pub methods: MethodsConfig,
    /// Chain handling
    pub chains: ChainsConfig,
    /// Hardware info source
    pub hardware: HardwareConfig,
}

impl WalletRpcConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.enabled && self.admin.enabled && self.http.port == self.admin.port {
            return Err(ConfigError::DuplicatePorts);
        }

        let names = [
            &self.methods.switch_ethereum_chain,
            &self.methods.add_ethereum_chain,
            &self.methods.system_fingerprint,
        ];
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::InvalidMethodName(
                "method names cannot be empty".into(),
            ));
        }
        let unique: HashSet<_> = names.iter().collect();
        if unique.len() != names.len() {
            return Err(ConfigError::InvalidMethodName(
                "method names must be distinct".into(),
            ));
        }

        if self.chains.max_safe_chain_id == 0 || self.chains.max_safe_chain_id > MAX_SAFE_CHAIN_ID {
            return Err(ConfigError::InvalidChain(format!(
                "max_safe_chain_id must be in 1..={}",
                MAX_SAFE_CHAIN_ID
            )));
        }

        ChainId::parse_with_max(&self.chains.default_chain_id, self.chains.max_safe_chain_id)
            .map_err(|e| ConfigError::InvalidChain(format!("default_chain_id: {}", e)))?;

        Ok(())
    }

    /// Load from the JSON file named by `WALLET_CONFIG` (if set), then apply
    /// environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var("WALLET_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };

        if let Some(port) = env_parse::<u16>("WALLET_HTTP_PORT")? {
            config.http.port = port;
        }
        if let Some(port) = env_parse::<u16>("WALLET_ADMIN_PORT")? {
            config.admin.port = port;
        }
        if let Ok(id) = env::var("WALLET_INFURA_PROJECT_ID") {
            config.chains.infura_project_id = id;
        }
        if let Ok(root) = env::var("WALLET_PROCFS_ROOT") {
            config.hardware.procfs_root = PathBuf::from(root);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))
    }

    /// HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }

    /// Admin server bind address
    pub fn admin_addr(&self) -> SocketAddr {
        SocketAddr::new(self.admin.host, self.admin.port)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Load(format!("{} has invalid value {:?}", key, raw))),
        Err(_) => Ok(None),
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: IpAddr,
    /// Port (default: 8545)
    pub port: u16,
    pub enabled: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8545,
            enabled: true,
        }
    }
}

/// Admin server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Bind address (localhost only by default; it resolves approvals)
    pub host: IpAddr,
    /// Port (default: 8080)
    pub port: u16,
    pub enabled: bool,
    /// `Host` header values accepted besides loopback names and addresses
    pub allowed_hosts: Vec<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            enabled: true,
            allowed_hosts: Vec::new(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    /// Max age for preflight cache, seconds
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["POST".to_string(), "OPTIONS".to_string()],
            allowed_headers: vec!["Content-Type".to_string()],
            max_age: 86400,
        }
    }
}

/// Method names the handlers answer to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodsConfig {
    pub switch_ethereum_chain: String,
    /// Referenced in the unrecognized-chain error
    pub add_ethereum_chain: String,
    pub system_fingerprint: String,
}

impl Default for MethodsConfig {
    fn default() -> Self {
        Self {
            switch_ethereum_chain: methods::SWITCH_ETHEREUM_CHAIN.to_string(),
            add_ethereum_chain: methods::ADD_ETHEREUM_CHAIN.to_string(),
            system_fingerprint: methods::GET_SYSTEM_FINGERPRINT.to_string(),
        }
    }
}

/// Chain handling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainsConfig {
    /// Project id appended to built-in Infura RPC URLs
    pub infura_project_id: String,
    /// Largest accepted chain id
    pub max_safe_chain_id: u64,
    /// Chain the provider starts on
    pub default_chain_id: String,
}

impl Default for ChainsConfig {
    fn default() -> Self {
        Self {
            infura_project_id: String::new(),
            max_safe_chain_id: MAX_SAFE_CHAIN_ID,
            default_chain_id: "0x1".to_string(),
        }
    }
}

/// Hardware info configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// Root under which `proc/` and `sys/` are read
    pub procfs_root: PathBuf,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            procfs_root: PathBuf::from("/"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("HTTP and admin ports must be different")]
    DuplicatePorts,
    #[error("invalid method name: {0}")]
    InvalidMethodName(String),
    #[error("invalid chain configuration: {0}")]
    InvalidChain(String),
    #[error("failed to load configuration: {0}")]
    Load(String),
}
