use crate::far_future::is_valid_future_epoch_at;
use crate::locks::DutyKind;
use crate::simple_signer::{sign_object, SimpleSigner};
use crate::{Result, SignResponse, SignerError};
use ethereum_types::{AttestationData, Domain};
use tracing::{debug, warn};

impl SimpleSigner {
    /// Sign attestation data after checking it against the highest
    /// attestation recorded for `pubkey` and raising that record.
    pub fn sign_beacon_attestation(
        &self,
        attestation: &AttestationData,
        domain: Domain,
        pubkey: &[u8],
    ) -> Result<SignResponse> {
        let account = self.account(pubkey)?;

        let lock = self.sign_locks.get(account.id(), DutyKind::Attestation);
        let _guard = lock.lock();

        let now = self.now();
        if !is_valid_future_epoch_at(self.network.as_ref(), attestation.target.epoch, now) {
            warn!(account = account.name(), target = attestation.target.epoch, "Refused far future attestation");
            return Err(SignerError::FarFuture("target epoch"));
        }
        if !is_valid_future_epoch_at(self.network.as_ref(), attestation.source.epoch, now) {
            warn!(account = account.name(), source = attestation.source.epoch, "Refused far future attestation");
            return Err(SignerError::FarFuture("source epoch"));
        }

        let status = self.protector.is_slashable_attestation(pubkey, attestation)?;
        if !status.is_valid() {
            warn!(account = account.name(), %attestation, %status, "Refused slashable attestation");
            return Err(SignerError::SlashableAttestation { status });
        }

        // Recorded before signing so a crash can only leave the record ahead.
        self.protector.update_highest_attestation(pubkey, attestation)?;

        let response = sign_object(account.as_ref(), attestation, domain)?;
        debug!(
            account = account.name(),
            source = attestation.source.epoch,
            target = attestation.target.epoch,
            signing_root = %response.signing_root,
            "Signed attestation"
        );
        Ok(response)
    }
}
