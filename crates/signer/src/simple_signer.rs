use crate::locks::SignLocks;
use crate::{AccountInfo, Result, SignResponse, SignerError};
use ethereum_account::{ValidatorAccount, Wallet};
use ethereum_slashing_protection::SlashingProtector;
use ethereum_types::{compute_signing_root, unix_now, Domain, NetworkCalendar, TreeHash};
use std::sync::Arc;

/// Signs validator duties for the accounts of one wallet.
///
/// Constructed once and shared by reference between all callers.
pub struct SimpleSigner {
    pub(crate) wallet: Arc<dyn Wallet>,
    pub(crate) protector: Arc<dyn SlashingProtector>,
    pub(crate) network: Arc<dyn NetworkCalendar>,
    pub(crate) sign_locks: SignLocks,
    pub(crate) clock: fn() -> i64,
}

impl SimpleSigner {
    pub fn new(
        wallet: Arc<dyn Wallet>,
        protector: Arc<dyn SlashingProtector>,
        network: Arc<dyn NetworkCalendar>,
    ) -> Self {
        Self {
            wallet,
            protector,
            network,
            sign_locks: SignLocks::new(),
            clock: unix_now,
        }
    }

    /// Replace the wall clock used by the far-future check.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn protector(&self) -> &Arc<dyn SlashingProtector> {
        &self.protector
    }

    pub fn network(&self) -> &Arc<dyn NetworkCalendar> {
        &self.network
    }

    /// Name and public key of every wallet account.
    pub fn list_accounts(&self) -> Vec<AccountInfo> {
        self.wallet
            .accounts()
            .iter()
            .map(|account| AccountInfo {
                name: account.name().to_string(),
                public_key: account.validator_public_key(),
            })
            .collect()
    }

    pub(crate) fn now(&self) -> i64 {
        (self.clock)()
    }

    pub(crate) fn account(&self, pubkey: &[u8]) -> Result<Arc<dyn ValidatorAccount>> {
        if pubkey.is_empty() {
            return Err(SignerError::AccountNotSupplied);
        }
        Ok(self.wallet.account_by_public_key(&hex::encode(pubkey))?)
    }
}

/// Sign `hash_tree_root(SigningData { hash_tree_root(obj), domain })`.
pub(crate) fn sign_object<T: TreeHash + ?Sized>(
    account: &dyn ValidatorAccount,
    obj: &T,
    domain: Domain,
) -> Result<SignResponse> {
    let signing_root = compute_signing_root(obj, domain);
    let signature = account.validation_key_sign(signing_root.as_slice())?;
    Ok(SignResponse { signature, signing_root })
}
