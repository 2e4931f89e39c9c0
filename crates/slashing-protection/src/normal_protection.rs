use crate::{ProtectionError, Result, SlashStatus, SlashingProtector};
use ethereum_storage::SlashingStore;
use ethereum_types::{AttestationData, Slot};
use std::sync::Arc;
use tracing::debug;

/// Watermark-based protection over a [`SlashingStore`].
///
/// Every check re-reads the store; nothing is cached between calls. Keys
/// without a stored watermark are refused, so protection state must be seeded
/// before a key signs for the first time.
pub struct NormalProtection<S: ?Sized = dyn SlashingStore> {
    store: Arc<S>,
}

impl<S: SlashingStore + ?Sized> NormalProtection<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<S: SlashingStore + ?Sized> SlashingProtector for NormalProtection<S> {
    fn is_slashable_attestation(&self, pubkey: &[u8], attestation: &AttestationData) -> Result<SlashStatus> {
        let highest = self
            .store
            .retrieve_highest_attestation(pubkey)?
            .ok_or(ProtectionError::HistoryNotFound("attestation"))?;

        // Source may repeat; target must strictly advance.
        if attestation.source.epoch < highest.source.epoch || attestation.target.epoch <= highest.target.epoch {
            return Ok(SlashStatus::HighestAttestationVote { attestation: attestation.clone() });
        }
        Ok(SlashStatus::Valid)
    }

    fn is_slashable_proposal(&self, pubkey: &[u8], slot: Slot) -> Result<SlashStatus> {
        if slot == 0 {
            return Err(ProtectionError::ZeroSlot);
        }
        let highest = self
            .store
            .retrieve_highest_proposal(pubkey)?
            .ok_or(ProtectionError::HistoryNotFound("proposal"))?;

        if slot > highest {
            return Ok(SlashStatus::Valid);
        }
        Ok(SlashStatus::HighestProposalVote { slot })
    }

    fn update_highest_attestation(&self, pubkey: &[u8], attestation: &AttestationData) -> Result<()> {
        let Some(mut highest) = self.store.retrieve_highest_attestation(pubkey)? else {
            self.store.save_highest_attestation(pubkey, attestation)?;
            return Ok(());
        };

        // Each bound is raised on its own.
        let mut changed = false;
        if highest.source.epoch < attestation.source.epoch {
            highest.source.epoch = attestation.source.epoch;
            changed = true;
        }
        if highest.target.epoch < attestation.target.epoch {
            highest.target.epoch = attestation.target.epoch;
            changed = true;
        }

        if changed {
            self.store.save_highest_attestation(pubkey, &highest)?;
            debug!(
                source = highest.source.epoch,
                target = highest.target.epoch,
                "Raised highest attestation"
            );
        }
        Ok(())
    }

    fn update_highest_proposal(&self, pubkey: &[u8], slot: Slot) -> Result<()> {
        if slot == 0 {
            return Err(ProtectionError::ZeroSlot);
        }
        let should_save = match self.store.retrieve_highest_proposal(pubkey)? {
            Some(highest) => slot > highest,
            None => true,
        };
        if should_save {
            self.store.save_highest_proposal(pubkey, slot)?;
            debug!(slot, "Raised highest proposal");
        }
        Ok(())
    }

    fn retrieve_highest_attestation(&self, pubkey: &[u8]) -> Result<Option<AttestationData>> {
        Ok(self.store.retrieve_highest_attestation(pubkey)?)
    }

    fn retrieve_highest_proposal(&self, pubkey: &[u8]) -> Result<Option<Slot>> {
        Ok(self.store.retrieve_highest_proposal(pubkey)?)
    }
}
