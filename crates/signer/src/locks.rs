use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Slashing-checked duties, each serialized independently per account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DutyKind {
    Attestation,
    Proposal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockKey {
    pub account_id: Uuid,
    pub duty: DutyKind,
}

/// Per (account, duty) mutexes.
///
/// The outer lock only guards the map itself and is never held while a
/// per-key mutex is being waited on.
#[derive(Debug, Default)]
pub struct SignLocks {
    locks: RwLock<HashMap<LockKey, Arc<Mutex<()>>>>,
}

impl SignLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutex for `(account_id, duty)`, created on first use.
    pub fn get(&self, account_id: Uuid, duty: DutyKind) -> Arc<Mutex<()>> {
        let key = LockKey { account_id, duty };
        if let Some(lock) = self.locks.read().get(&key) {
            return lock.clone();
        }
        self.locks.write().entry(key).or_default().clone()
    }

    pub fn len(&self) -> usize {
        self.locks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.read().is_empty()
    }
}
