use crate::{AccountError, Result, ValidatorAccount};
use ethereum_types::PublicKeyBytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Resolves validator public keys to signing accounts.
pub trait Wallet: Send + Sync {
    fn id(&self) -> Uuid;

    /// Every account held by the wallet, ordered by name.
    fn accounts(&self) -> Vec<Arc<dyn ValidatorAccount>>;

    /// Look up an account by hex-encoded public key (`0x` prefix optional).
    /// Any key the wallet does not hold, well-formed or not, is not found.
    fn account_by_public_key(&self, pubkey: &str) -> Result<Arc<dyn ValidatorAccount>>;
}

/// Non-deterministic wallet: holds independently generated or imported keys.
pub struct NdWallet {
    id: Uuid,
    name: String,
    accounts: RwLock<HashMap<PublicKeyBytes, Arc<dyn ValidatorAccount>>>,
}

impl NdWallet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            accounts: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_account(&self, account: Arc<dyn ValidatorAccount>) -> Result<()> {
        let pubkey = account.validator_public_key();
        let mut accounts = self.accounts.write();
        if accounts.contains_key(&pubkey) {
            return Err(AccountError::AccountExists(pubkey.to_string()));
        }
        info!(wallet = %self.name, account = account.name(), pubkey = %pubkey, "Added validator account");
        accounts.insert(pubkey, account);
        Ok(())
    }

    pub fn delete_account(&self, pubkey: &PublicKeyBytes) -> Result<()> {
        self.accounts
            .write()
            .remove(pubkey)
            .map(|_| ())
            .ok_or(AccountError::AccountNotFound)
    }

    pub fn account_by_id(&self, id: Uuid) -> Result<Arc<dyn ValidatorAccount>> {
        self.accounts
            .read()
            .values()
            .find(|a| a.id() == id)
            .cloned()
            .ok_or(AccountError::AccountNotFound)
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

impl Wallet for NdWallet {
    fn id(&self) -> Uuid {
        self.id
    }

    fn accounts(&self) -> Vec<Arc<dyn ValidatorAccount>> {
        let mut accounts: Vec<_> = self.accounts.read().values().cloned().collect();
        accounts.sort_by(|a, b| a.name().cmp(b.name()));
        accounts
    }

    fn account_by_public_key(&self, pubkey: &str) -> Result<Arc<dyn ValidatorAccount>> {
        let key = PublicKeyBytes::from_str(pubkey).map_err(|_| AccountError::AccountNotFound)?;
        self.accounts
            .read()
            .get(&key)
            .cloned()
            .ok_or(AccountError::AccountNotFound)
    }
}
