use thiserror::Error;

pub mod file;
pub mod memory;
#[cfg(feature = "rocksdb")]
pub mod rocksdb;
pub mod slashing;
pub mod traits;

pub use file::FileDatabase;
pub use memory::MemoryDatabase;
#[cfg(feature = "rocksdb")]
pub use rocksdb::RocksDatabase;
pub use slashing::{DatabaseSlashingStore, SlashingStore};
pub use traits::*;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("public key is empty")]
    EmptyPublicKey,

    #[error("proposal slot is zero")]
    ZeroProposalSlot,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Key namespaces used by the slashing protection store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    HighestAttestation,
    HighestProposal,
}

impl KeyPrefix {
    pub const ALL: [KeyPrefix; 2] = [KeyPrefix::HighestAttestation, KeyPrefix::HighestProposal];

    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::HighestAttestation => b"highest_attestation",
            KeyPrefix::HighestProposal => b"highest_proposal",
        }
    }

    pub fn make_key(&self, suffix: &[u8]) -> Vec<u8> {
        let prefix = self.as_bytes();
        let mut key = Vec::with_capacity(prefix.len() + suffix.len());
        key.extend_from_slice(prefix);
        key.extend_from_slice(suffix);
        key
    }

    /// Strip this prefix from `key`, returning the suffix when it matches.
    pub fn strip<'a>(&self, key: &'a [u8]) -> Option<&'a [u8]> {
        key.strip_prefix(self.as_bytes())
    }
}
