//! Validator signing with slashing protection.
//!
//! [`SimpleSigner`] resolves the validator account for every request and
//! signs the consensus signing root of the message. Attestations and block
//! proposals are additionally serialized per account, bounded in time and
//! checked against the slashing protector, whose watermark is raised before
//! the signature is produced.

use ethereum_account::AccountError;
use ethereum_slashing_protection::{ProtectionError, SlashStatus};
use ethereum_types::{PublicKeyBytes, Root, SignatureBytes};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod attestation;
pub mod deposit;
mod duties;
pub mod far_future;
pub mod locks;
mod proposal;
mod simple_signer;
#[cfg(test)]
mod test_utils;

pub use deposit::{bls_withdrawal_credentials, SignedDeposit, MAX_EFFECTIVE_BALANCE_GWEI};
pub use far_future::{is_valid_future_epoch, is_valid_future_slot, FAR_FUTURE_MAX_VALID_SECS};
pub use locks::{DutyKind, SignLocks};
pub use simple_signer::SimpleSigner;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("account was not supplied")]
    AccountNotSupplied,

    #[error("account not found")]
    AccountNotFound,

    /// The request names a slot or epoch past the allowed window.
    #[error("{0} too far into the future")]
    FarFuture(&'static str),

    #[error("slashable attestation ({status}), not signing")]
    SlashableAttestation { status: SlashStatus },

    #[error("slashable proposal ({status}), not signing")]
    SlashableProposal { status: SlashStatus },

    #[error("slashing protection: {0}")]
    Protection(#[from] ProtectionError),

    #[error("account: {0}")]
    Account(AccountError),
}

impl From<AccountError> for SignerError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::AccountNotFound => SignerError::AccountNotFound,
            other => SignerError::Account(other),
        }
    }
}

impl SignerError {
    /// Refusals are expected outcomes: the message must not be broadcast,
    /// but nothing is wrong with the signer.
    pub fn is_slashing_refusal(&self) -> bool {
        matches!(self, SignerError::SlashableAttestation { .. } | SignerError::SlashableProposal { .. })
    }
}

pub type Result<T> = std::result::Result<T, SignerError>;

/// Signature over `signing_root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignResponse {
    pub signature: SignatureBytes,
    pub signing_root: Root,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub name: String,
    pub public_key: PublicKeyBytes,
}
