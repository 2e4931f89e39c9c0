//! Ethereum validator key manager: assembles the protection store, the
//! slashing protector and the signer from a [`Config`].

pub mod config;

pub use config::{Config, LogConfig, NetworkSection, ProtectionConfig, StorageBackend, StorageConfig};

pub use ethereum_account as account;
pub use ethereum_crypto as crypto;
pub use ethereum_signer as signer;
pub use ethereum_slashing_protection as slashing_protection;
pub use ethereum_storage as storage;
pub use ethereum_types as types;

use anyhow::{Context, Result};
use ethereum_account::Wallet;
use ethereum_signer::SimpleSigner;
use ethereum_slashing_protection::{new_protector, NormalProtection, SlashingProtector};
use ethereum_storage::{Database, DatabaseSlashingStore, FileDatabase, MemoryDatabase, SlashingStore};
use ethereum_types::{AttestationData, Checkpoint, NetworkConfig, PublicKeyBytes, Slot};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn client_version() -> String {
    format!("ethereum-key-manager/v{}/rust", VERSION)
}

/// Stored watermarks of one validator key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectionRecord {
    pub pubkey: PublicKeyBytes,
    pub highest_attestation: Option<AttestationData>,
    pub highest_proposal: Option<Slot>,
}

pub struct KeyManager {
    network: NetworkConfig,
    store: Arc<DatabaseSlashingStore>,
    signer: SimpleSigner,
}

impl KeyManager {
    /// Build the store, protector and signer described by `config` for the accounts of `wallet`.
    pub fn from_config(config: &Config, wallet: Arc<dyn Wallet>) -> Result<Self> {
        config.validate()?;
        let network = config.network_config()?;
        let db = open_database(&config.storage)?;
        let store = Arc::new(DatabaseSlashingStore::new(db));

        let protector = new_protector(config.protection.mode, store.clone());
        info!(
            network = %network.name,
            protection = %config.protection.mode,
            backend = ?config.storage.backend,
            "Key manager ready"
        );

        let signer = SimpleSigner::new(wallet, protector, Arc::new(network.clone()));
        Ok(Self { network, store, signer })
    }

    pub fn signer(&self) -> &SimpleSigner {
        &self.signer
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn store(&self) -> &Arc<DatabaseSlashingStore> {
        &self.store
    }

    /// Raise the watermarks of `pubkey` to at least the given values. Keys must
    /// be seeded before their first attestation or proposal under normal
    /// protection. Seeding never lowers an existing watermark.
    ///
    /// `slot` must be at least 1: a key without a proposal watermark cannot
    /// propose, so a zero slot is rejected before anything is written.
    pub fn seed_protection(&self, pubkey: &PublicKeyBytes, source: u64, target: u64, slot: Slot) -> Result<()> {
        anyhow::ensure!(slot > 0, "proposal slot must be at least 1");
        anyhow::ensure!(source <= target, "source epoch must not exceed target epoch");

        let seeder = NormalProtection::new(self.store.clone());
        let attestation = AttestationData {
            slot: target.saturating_mul(self.network.slots_per_epoch),
            source: Checkpoint { epoch: source, ..Default::default() },
            target: Checkpoint { epoch: target, ..Default::default() },
            ..Default::default()
        };
        seeder
            .update_highest_attestation(pubkey.as_bytes(), &attestation)
            .context("Failed to seed highest attestation")?;
        seeder
            .update_highest_proposal(pubkey.as_bytes(), slot)
            .context("Failed to seed highest proposal")?;
        info!(%pubkey, source, target, slot, "Seeded slashing protection");
        Ok(())
    }

    pub fn protection_record(&self, pubkey: &PublicKeyBytes) -> Result<ProtectionRecord> {
        Ok(ProtectionRecord {
            pubkey: *pubkey,
            highest_attestation: self.store.retrieve_highest_attestation(pubkey.as_bytes())?,
            highest_proposal: self.store.retrieve_highest_proposal(pubkey.as_bytes())?,
        })
    }

    /// Every public key with stored protection state.
    pub fn protected_keys(&self) -> Result<Vec<PublicKeyBytes>> {
        self.store
            .list_protected_keys()?
            .iter()
            .map(|key| PublicKeyBytes::from_slice(key).context("Corrupt public key in protection store"))
            .collect()
    }
}

/// Open the configured protection database.
pub fn open_database(config: &StorageConfig) -> Result<Arc<dyn Database>> {
    let db: Arc<dyn Database> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryDatabase::new()),
        StorageBackend::File => Arc::new(
            FileDatabase::open(&config.path)
                .with_context(|| format!("Failed to open {}", config.path.display()))?,
        ),
        #[cfg(feature = "rocksdb")]
        StorageBackend::Rocksdb => Arc::new(
            ethereum_storage::RocksDatabase::open(&config.path)
                .with_context(|| format!("Failed to open {}", config.path.display()))?,
        ),
        #[cfg(not(feature = "rocksdb"))]
        StorageBackend::Rocksdb => anyhow::bail!("rocksdb backend requires building with the `rocksdb` feature"),
    };
    Ok(db)
}
