use anyhow::{Context, Result};
use ethereum_slashing_protection::ProtectionMode;
use ethereum_types::{Network, NetworkConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Complete key manager configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Beacon chain network the keys sign for
    pub network: NetworkSection,
    /// Slashing protection configuration
    pub protection: ProtectionConfig,
    /// Protection state storage
    pub storage: StorageConfig,
    /// Logging configuration
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSection {
    /// Network name (mainnet, prater, sepolia, holesky, hoodi)
    pub name: String,
    /// Genesis time override for devnets
    pub genesis_time: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectionConfig {
    /// `normal` checks every attestation and proposal, `none` trusts an external protector
    pub mode: ProtectionMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
    Rocksdb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage backend
    pub backend: StorageBackend,
    /// File or directory holding the protection database
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level, overridden by RUST_LOG
    pub level: String,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            name: Network::Mainnet.name().to_string(),
            genesis_time: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: PathBuf::from("./slashing-protection.json"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content).context("Failed to write configuration file")?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.network_config()?;

        if self.storage.backend != StorageBackend::Memory && self.storage.path.as_os_str().is_empty() {
            anyhow::bail!("storage.path must be set for the {:?} backend", self.storage.backend);
        }

        if self.storage.backend == StorageBackend::Rocksdb && !cfg!(feature = "rocksdb") {
            anyhow::bail!("rocksdb backend requires building with the `rocksdb` feature");
        }

        Ok(())
    }

    /// Configuration for a named network with every other section at its default
    pub fn for_network(network: &str) -> Result<Self> {
        let mut config = Config::default();
        config.network.name = network.to_lowercase();
        config.validate()?;
        Ok(config)
    }

    /// Resolve the network calendar, applying the genesis override
    pub fn network_config(&self) -> Result<NetworkConfig> {
        let network: Network = self
            .network
            .name
            .parse()
            .with_context(|| format!("Invalid network `{}`", self.network.name))?;
        let mut config = network.config();
        if let Some(genesis_time) = self.network.genesis_time {
            config.min_genesis_time = genesis_time;
        }
        Ok(config)
    }
}
