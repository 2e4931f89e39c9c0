//! Slashing protection for validator signing.
//!
//! A protector keeps one "highest" watermark per validator public key: the
//! highest source and target epochs ever attested and the highest slot ever
//! proposed. A request is approved only if it moves strictly past the
//! watermark, which rules out double votes and the surround votes reachable
//! from it. This is a conservative approximation of full vote-history
//! checking.

use ethereum_storage::{SlashingStore, StorageError};
use ethereum_types::{AttestationData, Slot};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

pub mod no_protection;
pub mod normal_protection;

pub use no_protection::NoProtection;
pub use normal_protection::NormalProtection;

#[derive(Debug, Error)]
pub enum ProtectionError {
    #[error("highest {0} data is nil, can't determine if {0} is slashable")]
    HistoryNotFound(&'static str),

    #[error("proposal slot can not be 0")]
    ZeroSlot,

    #[error("slashing store: {0}")]
    Store(#[from] StorageError),

    #[error("unknown protection mode: {0}")]
    UnknownMode(String),
}

pub type Result<T> = std::result::Result<T, ProtectionError>;

/// Outcome of a slashability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashStatus {
    Valid,
    /// The attestation does not move past the stored highest source/target.
    HighestAttestationVote { attestation: AttestationData },
    /// The proposal slot is not above the stored highest proposal slot.
    HighestProposalVote { slot: Slot },
}

impl SlashStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, SlashStatus::Valid)
    }
}

impl fmt::Display for SlashStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlashStatus::Valid => write!(f, "Valid"),
            SlashStatus::HighestAttestationVote { .. } => write!(f, "HighestAttestationVote"),
            SlashStatus::HighestProposalVote { .. } => write!(f, "HighestProposalVote"),
        }
    }
}

pub trait SlashingProtector: Send + Sync {
    fn is_slashable_attestation(&self, pubkey: &[u8], attestation: &AttestationData) -> Result<SlashStatus>;

    fn is_slashable_proposal(&self, pubkey: &[u8], slot: Slot) -> Result<SlashStatus>;

    /// Raise the stored attestation watermark to cover `attestation`.
    fn update_highest_attestation(&self, pubkey: &[u8], attestation: &AttestationData) -> Result<()>;

    /// Raise the stored proposal watermark to cover `slot`.
    fn update_highest_proposal(&self, pubkey: &[u8], slot: Slot) -> Result<()>;

    fn retrieve_highest_attestation(&self, pubkey: &[u8]) -> Result<Option<AttestationData>>;

    fn retrieve_highest_proposal(&self, pubkey: &[u8]) -> Result<Option<Slot>>;
}

/// Which protector a deployment runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionMode {
    #[default]
    Normal,
    /// Only for keys already guarded by an external, trusted protector.
    None,
}

impl ProtectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectionMode::Normal => "normal",
            ProtectionMode::None => "none",
        }
    }
}

impl FromStr for ProtectionMode {
    type Err = ProtectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(ProtectionMode::Normal),
            "none" => Ok(ProtectionMode::None),
            other => Err(ProtectionError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for ProtectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the protector for `mode` over `store`.
pub fn new_protector(mode: ProtectionMode, store: Arc<dyn SlashingStore>) -> Arc<dyn SlashingProtector> {
    match mode {
        ProtectionMode::Normal => Arc::new(NormalProtection::new(store)),
        ProtectionMode::None => Arc::new(NoProtection),
    }
}
