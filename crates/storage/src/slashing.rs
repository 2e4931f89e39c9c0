//! Durable "highest" watermarks per validator public key.

use crate::{Database, KeyPrefix, Result, StorageError, TypedDatabase};
use ethereum_types::{AttestationData, Slot};
use std::sync::Arc;
use tracing::debug;

/// Storage consumed by slashing protection. Keys are 48-byte serialized BLS public keys.
pub trait SlashingStore: Send + Sync {
    fn save_highest_attestation(&self, pubkey: &[u8], attestation: &AttestationData) -> Result<()>;

    fn retrieve_highest_attestation(&self, pubkey: &[u8]) -> Result<Option<AttestationData>>;

    fn save_highest_proposal(&self, pubkey: &[u8], slot: Slot) -> Result<()>;

    fn retrieve_highest_proposal(&self, pubkey: &[u8]) -> Result<Option<Slot>>;
}

impl<S: SlashingStore + ?Sized> SlashingStore for Arc<S> {
    fn save_highest_attestation(&self, pubkey: &[u8], attestation: &AttestationData) -> Result<()> {
        (**self).save_highest_attestation(pubkey, attestation)
    }

    fn retrieve_highest_attestation(&self, pubkey: &[u8]) -> Result<Option<AttestationData>> {
        (**self).retrieve_highest_attestation(pubkey)
    }

    fn save_highest_proposal(&self, pubkey: &[u8], slot: Slot) -> Result<()> {
        (**self).save_highest_proposal(pubkey, slot)
    }

    fn retrieve_highest_proposal(&self, pubkey: &[u8]) -> Result<Option<Slot>> {
        (**self).retrieve_highest_proposal(pubkey)
    }
}

/// [`SlashingStore`] over any key/value [`Database`].
pub struct DatabaseSlashingStore<D: ?Sized = dyn Database> {
    db: Arc<D>,
}

impl<D: Database + ?Sized> DatabaseSlashingStore<D> {
    pub fn new(db: Arc<D>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Arc<D> {
        &self.db
    }

    /// Public keys that have at least one stored watermark, sorted and deduplicated.
    pub fn list_protected_keys(&self) -> Result<Vec<Vec<u8>>> {
        let mut keys = Vec::new();
        for prefix in KeyPrefix::ALL {
            for key in self.db.keys_with_prefix(prefix.as_bytes())? {
                if let Some(pubkey) = prefix.strip(&key) {
                    keys.push(pubkey.to_vec());
                }
            }
        }
        keys.sort();
        keys.dedup();
        Ok(keys)
    }
}

fn check_pubkey(pubkey: &[u8]) -> Result<()> {
    if pubkey.is_empty() {
        return Err(StorageError::EmptyPublicKey);
    }
    Ok(())
}

impl<D: Database + ?Sized> SlashingStore for DatabaseSlashingStore<D> {
    fn save_highest_attestation(&self, pubkey: &[u8], attestation: &AttestationData) -> Result<()> {
        check_pubkey(pubkey)?;
        self.db.put_typed(&KeyPrefix::HighestAttestation.make_key(pubkey), attestation)?;
        debug!(
            pubkey = %hex::encode(pubkey),
            source = attestation.source.epoch,
            target = attestation.target.epoch,
            "Saved highest attestation"
        );
        Ok(())
    }

    fn retrieve_highest_attestation(&self, pubkey: &[u8]) -> Result<Option<AttestationData>> {
        check_pubkey(pubkey)?;
        self.db.get_typed(&KeyPrefix::HighestAttestation.make_key(pubkey))
    }

    fn save_highest_proposal(&self, pubkey: &[u8], slot: Slot) -> Result<()> {
        check_pubkey(pubkey)?;
        if slot == 0 {
            return Err(StorageError::ZeroProposalSlot);
        }
        self.db.put_typed(&KeyPrefix::HighestProposal.make_key(pubkey), &slot)?;
        debug!(pubkey = %hex::encode(pubkey), slot, "Saved highest proposal");
        Ok(())
    }

    fn retrieve_highest_proposal(&self, pubkey: &[u8]) -> Result<Option<Slot>> {
        check_pubkey(pubkey)?;
        self.db.get_typed(&KeyPrefix::HighestProposal.make_key(pubkey))
    }
}
