use crate::{Result, SlashStatus, SlashingProtector};
use ethereum_types::{AttestationData, Slot};

/// Approves everything and records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProtection;

impl SlashingProtector for NoProtection {
    fn is_slashable_attestation(&self, _pubkey: &[u8], _attestation: &AttestationData) -> Result<SlashStatus> {
        Ok(SlashStatus::Valid)
    }

    fn is_slashable_proposal(&self, _pubkey: &[u8], _slot: Slot) -> Result<SlashStatus> {
        Ok(SlashStatus::Valid)
    }

    fn update_highest_attestation(&self, _pubkey: &[u8], _attestation: &AttestationData) -> Result<()> {
        Ok(())
    }

    fn update_highest_proposal(&self, _pubkey: &[u8], _slot: Slot) -> Result<()> {
        Ok(())
    }

    fn retrieve_highest_attestation(&self, _pubkey: &[u8]) -> Result<Option<AttestationData>> {
        Ok(None)
    }

    fn retrieve_highest_proposal(&self, _pubkey: &[u8]) -> Result<Option<Slot>> {
        Ok(None)
    }
}
