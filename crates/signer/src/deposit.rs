//! Deposit data for the deposit contract. Signing a deposit cannot cause
//! slashing, so it goes through neither the locks nor the protector.

use crate::simple_signer::{sign_object, SimpleSigner};
use crate::Result;
use ethereum_types::{
    compute_domain, DepositData, DepositMessage, DomainType, Gwei, Hash256, Root, TreeHash, Version,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

/// 32 ETH.
pub const MAX_EFFECTIVE_BALANCE_GWEI: Gwei = 32_000_000_000;
pub const BLS_WITHDRAWAL_PREFIX: u8 = 0x00;

/// Deposits are valid on every fork, so they are signed with the genesis
/// fork version and no genesis validators root.
const DEPOSIT_FORK_VERSION: Version = [0, 0, 0, 0];

/// `BLS_WITHDRAWAL_PREFIX ‖ sha256(withdrawal_pubkey)[1..]`
pub fn bls_withdrawal_credentials(withdrawal_pubkey: &[u8]) -> Hash256 {
    let mut credentials: [u8; 32] = Sha256::digest(withdrawal_pubkey).into();
    credentials[0] = BLS_WITHDRAWAL_PREFIX;
    Hash256::from(credentials)
}

/// Signed deposit data and its hash tree root, as submitted to the deposit contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedDeposit {
    pub deposit_data: DepositData,
    pub deposit_data_root: Root,
}

impl SimpleSigner {
    /// Build and sign the deposit of `amount` gwei for the account holding
    /// `pubkey`, withdrawable by the BLS key `withdrawal_pubkey`.
    pub fn sign_deposit_data(&self, withdrawal_pubkey: &[u8], amount: Gwei, pubkey: &[u8]) -> Result<SignedDeposit> {
        let account = self.account(pubkey)?;

        let message = DepositMessage {
            pubkey: account.validator_public_key(),
            withdrawal_credentials: bls_withdrawal_credentials(withdrawal_pubkey),
            amount,
        };
        let domain = compute_domain(DomainType::DEPOSIT, DEPOSIT_FORK_VERSION, Root::ZERO);
        let response = sign_object(account.as_ref(), &message, domain)?;

        let deposit_data = DepositData {
            pubkey: message.pubkey,
            withdrawal_credentials: message.withdrawal_credentials,
            amount: message.amount,
            signature: response.signature,
        };
        let deposit_data_root = deposit_data.tree_hash_root();
        debug!(account = account.name(), amount, %deposit_data_root, "Signed deposit data");

        Ok(SignedDeposit { deposit_data, deposit_data_root })
    }
}
