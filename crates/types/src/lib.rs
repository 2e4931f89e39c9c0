pub mod bytes;
pub mod containers;
pub mod network;
pub mod signing;

pub use alloy_primitives::{Address, B256};
pub use bytes::{PublicKeyBytes, SignatureBytes, PUBLIC_KEY_BYTES_LEN, SIGNATURE_BYTES_LEN};
pub use containers::{
    AttestationData, BeaconBlockHeader, BlsToExecutionChange, Checkpoint, DepositData,
    DepositMessage, SyncAggregatorSelectionData, ValidatorRegistration, VoluntaryExit,
};
pub use network::{unix_now, Network, NetworkCalendar, NetworkConfig};
pub use signing::{
    compute_domain, compute_signing_root, ForkData, OpaqueRoot, SigningData, DomainType,
};
pub use tree_hash::TreeHash;

use thiserror::Error;

/// 32-byte SSZ root.
pub type Hash256 = B256;
/// Hash tree root of a signed object.
pub type Root = Hash256;
/// Signature domain mixed into every signing root.
pub type Domain = Hash256;
/// Fork version.
pub type Version = [u8; 4];
pub type Slot = u64;
pub type Epoch = u64;
pub type ValidatorIndex = u64;
pub type Gwei = u64;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Network not found for fork version 0x{0}")]
    UnknownForkVersion(String),
}

pub type Result<T> = std::result::Result<T, TypesError>;
