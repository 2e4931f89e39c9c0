use crate::far_future::is_valid_future_slot_at;
use crate::locks::DutyKind;
use crate::simple_signer::{sign_object, SimpleSigner};
use crate::{Result, SignResponse, SignerError};
use ethereum_types::{BeaconBlockHeader, Domain, Slot, TreeHash};
use tracing::{debug, warn};

impl SimpleSigner {
    /// Sign a beacon block through its header. A block and its header share
    /// the same hash tree root once `body_root` is the root of the body.
    pub fn sign_beacon_block(&self, header: &BeaconBlockHeader, domain: Domain, pubkey: &[u8]) -> Result<SignResponse> {
        self.sign_block(header, header.slot, domain, pubkey)
    }

    /// Blinded blocks commit to the payload header instead of the payload,
    /// which is already reflected in `body_root`.
    pub fn sign_blinded_beacon_block(
        &self,
        header: &BeaconBlockHeader,
        domain: Domain,
        pubkey: &[u8],
    ) -> Result<SignResponse> {
        self.sign_block(header, header.slot, domain, pubkey)
    }

    /// Sign any block container proposed at `slot`.
    pub fn sign_block<T: TreeHash + ?Sized>(
        &self,
        block: &T,
        slot: Slot,
        domain: Domain,
        pubkey: &[u8],
    ) -> Result<SignResponse> {
        let account = self.account(pubkey)?;

        let lock = self.sign_locks.get(account.id(), DutyKind::Proposal);
        let _guard = lock.lock();

        if !is_valid_future_slot_at(self.network.as_ref(), slot, self.now()) {
            warn!(account = account.name(), slot, "Refused far future proposal");
            return Err(SignerError::FarFuture("proposed block slot"));
        }

        let status = self.protector.is_slashable_proposal(pubkey, slot)?;
        if !status.is_valid() {
            warn!(account = account.name(), slot, %status, "Refused slashable proposal");
            return Err(SignerError::SlashableProposal { status });
        }

        self.protector.update_highest_proposal(pubkey, slot)?;

        let response = sign_object(account.as_ref(), block, domain)?;
        debug!(account = account.name(), slot, signing_root = %response.signing_root, "Signed block");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use crate::locks::DutyKind;
    use crate::test_utils::*;
    use crate::{SignerError, SimpleSigner};
    use ethereum_slashing_protection::{ProtectionError, ProtectionMode, SlashStatus};
    use ethereum_storage::SlashingStore;
    use ethereum_types::{compute_signing_root, BeaconBlockHeader, Hash256, Network, NetworkCalendar};
    use std::sync::mpsc::{self, RecvTimeoutError};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    const DOMAIN: &str = "0000000081509579e35e84020ad8751eca180b44df470332d3ad17fc6fd52459";

    fn header(slot: u64) -> BeaconBlockHeader {
        BeaconBlockHeader {
            slot,
            proposer_index: 7,
            parent_root: Hash256::repeat_byte(1),
            state_root: Hash256::repeat_byte(2),
            body_root: Hash256::repeat_byte(3),
        }
    }

    #[test]
    fn test_proposal_scenario() {
        let (signer, store) = signer_with_keys(&[SK_3]);
        let pk = bytes(PK_3);
        seed(&store, &pk, 0, 0, 100);
        let domain = root(DOMAIN);

        let err = signer.sign_beacon_block(&header(100), domain, &pk).unwrap_err();
        assert_eq!(err.to_string(), "slashable proposal (HighestProposalVote), not signing");
        assert!(matches!(
            err,
            SignerError::SlashableProposal { status: SlashStatus::HighestProposalVote { slot: 100 } }
        ));

        let response = signer.sign_beacon_block(&header(101), domain, &pk).unwrap();
        assert_eq!(response.signing_root, compute_signing_root(&header(101), domain));
        assert_eq!(store.retrieve_highest_proposal(&pk).unwrap(), Some(101));

        assert!(signer.sign_beacon_block(&header(99), domain, &pk).unwrap_err().is_slashing_refusal());
        assert_eq!(store.retrieve_highest_proposal(&pk).unwrap(), Some(101));
    }

    #[test]
    fn test_blinded_block_shares_proposal_watermark() {
        let (signer, store) = signer_with_keys(&[SK_3]);
        let pk = bytes(PK_3);
        seed(&store, &pk, 0, 0, 10);

        signer.sign_blinded_beacon_block(&header(11), root(DOMAIN), &pk).unwrap();
        assert!(signer.sign_beacon_block(&header(11), root(DOMAIN), &pk).is_err());
    }

    #[test]
    fn test_generic_block_uses_given_slot() {
        let (signer, store) = signer_with_keys(&[SK_3]);
        let pk = bytes(PK_3);
        seed(&store, &pk, 0, 0, 10);

        let body = Hash256::repeat_byte(9);
        let response = signer.sign_block(&body, 20, root(DOMAIN), &pk).unwrap();
        assert_eq!(response.signing_root, compute_signing_root(&body, root(DOMAIN)));
        assert_eq!(store.retrieve_highest_proposal(&pk).unwrap(), Some(20));
    }

    #[test]
    fn test_zero_slot_rejected() {
        let (signer, store) = signer_with_keys(&[SK_3]);
        let pk = bytes(PK_3);
        seed(&store, &pk, 0, 0, 10);

        let err = signer.sign_beacon_block(&header(0), root(DOMAIN), &pk).unwrap_err();
        assert!(matches!(err, SignerError::Protection(ProtectionError::ZeroSlot)));
    }

    #[test]
    fn test_far_future_slot() {
        let (signer, store) = signer_with_keys(&[SK_3]);
        let pk = bytes(PK_3);
        seed(&store, &pk, 0, 0, 10);

        let far = Network::Mainnet.estimated_current_slot() + 1_000;
        let err = signer.sign_beacon_block(&header(far), root(DOMAIN), &pk).unwrap_err();
        assert_eq!(err.to_string(), "proposed block slot too far into the future");
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn test_no_protection_signs_unseeded_key() {
        let store = Arc::new(SpyStore::new());
        let signer = signer_with(&[SK_3], store.clone(), ProtectionMode::None);

        signer.sign_beacon_block(&header(5), root(DOMAIN), &bytes(PK_3)).unwrap();
        signer.sign_beacon_block(&header(5), root(DOMAIN), &bytes(PK_3)).unwrap();
        assert_eq!(store.calls(), 0);
    }

    fn spawn_job(
        signer: &Arc<SimpleSigner>,
        pk: &[u8],
        job: fn(&SimpleSigner, &[u8]) -> bool,
    ) -> mpsc::Receiver<bool> {
        let (signer, pk) = (signer.clone(), pk.to_vec());
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(job(&signer, &pk));
        });
        rx
    }

    #[test]
    fn test_attestation_and_proposal_locks_are_independent() {
        let store = Arc::new(SpyStore::new());
        let signer = Arc::new(signer_with(&[SK_1], store.clone(), ProtectionMode::Normal));
        let pk = bytes(PK_1);
        seed(&store, &pk, 1, 2, 10);

        let account_id = signer.account(&pk).unwrap().id();
        let attestation_lock = signer.sign_locks.get(account_id, DutyKind::Attestation);
        let guard = attestation_lock.lock();

        // A proposal completes while the attestation lock is held.
        let proposer = spawn_job(&signer, &pk, |signer, pk| {
            signer.sign_beacon_block(&header(11), root(DOMAIN), pk).is_ok()
        });
        assert_eq!(proposer.recv_timeout(Duration::from_secs(5)), Ok(true));

        // An attestation for the same account waits for it.
        let attester = spawn_job(&signer, &pk, |signer, pk| {
            signer.sign_beacon_attestation(&attestation(2, 3), root(DOMAIN), pk).is_ok()
        });
        assert_eq!(attester.recv_timeout(Duration::from_millis(200)), Err(RecvTimeoutError::Timeout));

        drop(guard);
        assert_eq!(attester.recv_timeout(Duration::from_secs(5)), Ok(true));
    }
}
