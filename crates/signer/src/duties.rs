//! Duties whose messages cannot cause slashing on their own. They resolve the
//! account and sign without locking or touching protection state.

use crate::simple_signer::{sign_object, SimpleSigner};
use crate::{Result, SignResponse};
use ethereum_types::{
    BlsToExecutionChange, Domain, Epoch, OpaqueRoot, Root, Slot, SyncAggregatorSelectionData, TreeHash,
    ValidatorRegistration, VoluntaryExit,
};
use tracing::debug;

impl SimpleSigner {
    fn sign_unchecked<T: TreeHash + ?Sized>(
        &self,
        duty: &'static str,
        obj: &T,
        domain: Domain,
        pubkey: &[u8],
    ) -> Result<SignResponse> {
        let account = self.account(pubkey)?;
        let response = sign_object(account.as_ref(), obj, domain)?;
        debug!(account = account.name(), duty, signing_root = %response.signing_root, "Signed");
        Ok(response)
    }

    pub fn sign_aggregate_and_proof<T: TreeHash + ?Sized>(
        &self,
        aggregate_and_proof: &T,
        domain: Domain,
        pubkey: &[u8],
    ) -> Result<SignResponse> {
        self.sign_unchecked("aggregate_and_proof", aggregate_and_proof, domain, pubkey)
    }

    /// Slot signature, used as the attestation aggregation selection proof.
    pub fn sign_slot(&self, slot: Slot, domain: Domain, pubkey: &[u8]) -> Result<SignResponse> {
        self.sign_unchecked("slot", &slot, domain, pubkey)
    }

    /// Epoch signature, used as the RANDAO reveal.
    pub fn sign_epoch(&self, epoch: Epoch, domain: Domain, pubkey: &[u8]) -> Result<SignResponse> {
        self.sign_unchecked("epoch", &epoch, domain, pubkey)
    }

    pub fn sign_sync_committee(&self, block_root: Root, domain: Domain, pubkey: &[u8]) -> Result<SignResponse> {
        self.sign_unchecked("sync_committee", &block_root, domain, pubkey)
    }

    pub fn sign_sync_committee_selection_data(
        &self,
        data: &SyncAggregatorSelectionData,
        domain: Domain,
        pubkey: &[u8],
    ) -> Result<SignResponse> {
        self.sign_unchecked("sync_committee_selection_data", data, domain, pubkey)
    }

    pub fn sign_sync_committee_contribution_and_proof<T: TreeHash + ?Sized>(
        &self,
        contribution_and_proof: &T,
        domain: Domain,
        pubkey: &[u8],
    ) -> Result<SignResponse> {
        self.sign_unchecked("contribution_and_proof", contribution_and_proof, domain, pubkey)
    }

    pub fn sign_voluntary_exit(&self, exit: &VoluntaryExit, domain: Domain, pubkey: &[u8]) -> Result<SignResponse> {
        self.sign_unchecked("voluntary_exit", exit, domain, pubkey)
    }

    pub fn sign_bls_to_execution_change(
        &self,
        change: &BlsToExecutionChange,
        domain: Domain,
        pubkey: &[u8],
    ) -> Result<SignResponse> {
        self.sign_unchecked("bls_to_execution_change", change, domain, pubkey)
    }

    /// Builder (MEV-boost) validator registration.
    pub fn sign_registration(
        &self,
        registration: &ValidatorRegistration,
        domain: Domain,
        pubkey: &[u8],
    ) -> Result<SignResponse> {
        self.sign_unchecked("registration", registration, domain, pubkey)
    }

    /// Opaque commitment bytes, merkleized as 32-byte chunks without a length mix-in.
    pub fn sign_preconf_commitment(&self, data: &[u8], domain: Domain, pubkey: &[u8]) -> Result<SignResponse> {
        self.sign_unchecked("preconf_commitment", &OpaqueRoot(data), domain, pubkey)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::*;
    use crate::SignerError;
    use ethereum_crypto::{PublicKey, Signature};
    use ethereum_slashing_protection::ProtectionMode;
    use ethereum_types::{
        compute_signing_root, Address, BlsToExecutionChange, Hash256, OpaqueRoot, PublicKeyBytes,
        SyncAggregatorSelectionData, TreeHash, ValidatorRegistration, VoluntaryExit,
    };
    use std::sync::Arc;

    const EXIT_DOMAIN: &str = "00000001d7a9bca8823e555db65bb772e1496a26e1a8c5b1c0c7def9c9eaf7f6";

    fn verify(pk_hex: &str, response: &crate::SignResponse) -> bool {
        let pk = PublicKey::from_bytes(&bytes(pk_hex)).unwrap();
        let sig = Signature::from_bytes(response.signature.as_bytes()).unwrap();
        sig.verify(response.signing_root.as_slice(), &pk)
    }

    #[test]
    fn test_slot_reference_signature() {
        let (signer, store) = signer_with_keys(&[SK_2]);
        let domain = root("050000008c84cda94176cc2b1268357c57c3160131874a4408e155b0db826d11");

        let response = signer.sign_slot(0, domain, &bytes(PK_2)).unwrap();
        assert_eq!(
            response.signature.to_hex(),
            "a1167cdbebeae876b3fa82d4f4c35fc3dc4706c7ae20cee359919fdbc93a2588c3f7a15c80d12a20c78ac6381a9fe35d06f6b8ae7e95fb87fa2195511bd53ce6f385aa71dda52b38771f954348a57acad9dde225da614c50c02173314417b096"
        );
        // Unseeded key under normal protection: no protection state involved.
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn test_voluntary_exit_reference_signature() {
        let signer = signer_with(&[SK_4], Arc::new(SpyStore::new()), ProtectionMode::None);
        let exit = VoluntaryExit { epoch: 1, validator_index: 0 };

        let response = signer.sign_voluntary_exit(&exit, root(EXIT_DOMAIN), &bytes(PK_4)).unwrap();
        assert_eq!(
            response.signature.to_hex(),
            "895740a6edec2907d16cc53b8c1357f8984706553a470748df2577cc6d881c6b75f88337bfad30421f9d620bb1dcb4ce15efa29dfc38679e2b3d3e99e0d773421ccb67f650522af1dac606327b2dacce8e5d767c6e4a6ed1eca45170d0a07c3c"
        );
    }

    #[test]
    fn test_bls_to_execution_change_reference_signature() {
        let signer = signer_with(&[SK_4], Arc::new(SpyStore::new()), ProtectionMode::None);
        // The reference message was built from the ASCII bytes of these strings.
        let change = BlsToExecutionChange {
            validator_index: 0,
            from_bls_pubkey: PublicKeyBytes::from_slice(&PK_4.as_bytes()[..48]).unwrap(),
            to_execution_address: Address::from_slice(&b"9831EeF7A86C19E32bEcDad091c1DbC974cf452a"[..20]),
        };

        let response = signer.sign_bls_to_execution_change(&change, root(EXIT_DOMAIN), &bytes(PK_4)).unwrap();
        assert_eq!(
            response.signature.to_hex(),
            "ad5d22d802766d53fa1349c557dd7a353b5668d5c833b0400749b50c5a7468ac1a61cd2b61f4da6dcc92c361540ea357102723af8f1539dd4eb4bb4a686c375015cbdf964719d88656b0686dbf46640e256ee35bd5609690b9b80d469fef2712"
        );
    }

    #[test]
    fn test_registration_reference_signature() {
        let signer = signer_with(&[SK_4], Arc::new(SpyStore::new()), ProtectionMode::None);
        let registration = ValidatorRegistration {
            fee_recipient: Address::from_slice(&bytes("9831EeF7A86C19E32bEcDad091c1DbC974cf452a")),
            gas_limit: 123_456,
            timestamp: 1_658_313_712,
            pubkey: PK_4.parse().unwrap(),
        };

        let response = signer.sign_registration(&registration, root(EXIT_DOMAIN), &bytes(PK_4)).unwrap();
        assert_eq!(
            response.signature.to_hex(),
            "b088d9d27c783f3d5eb57a0df1e99f030e035ebcfdeb745da95400ab46a0c461f05f61533379d3bc56c5e94dfdf8560d0a31cfb9162f11ba9a82522f4043764a02008f6fef3b0167cbf2db9a749095343412a38568fe39d14c3ebcdddad7ee36"
        );
    }

    #[test]
    fn test_epoch_and_sync_committee_roots() {
        let (signer, store) = signer_with_keys(&[SK_1]);
        let domain = Hash256::repeat_byte(7);
        let block_root = root(BLOCK_ROOT);

        let epoch = signer.sign_epoch(12, domain, &bytes(PK_1)).unwrap();
        assert_eq!(epoch.signing_root, compute_signing_root(&12u64, domain));
        assert!(verify(PK_1, &epoch));

        let sync = signer.sign_sync_committee(block_root, domain, &bytes(PK_1)).unwrap();
        assert_eq!(sync.signing_root, compute_signing_root(&block_root, domain));
        assert!(verify(PK_1, &sync));

        let selection = SyncAggregatorSelectionData { slot: 5, subcommittee_index: 2 };
        let response = signer.sign_sync_committee_selection_data(&selection, domain, &bytes(PK_1)).unwrap();
        assert_eq!(response.signing_root, compute_signing_root(&selection, domain));

        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn test_generic_duties_hash_given_container() {
        let (signer, _) = signer_with_keys(&[SK_1]);
        let domain = Hash256::repeat_byte(6);
        let container = VoluntaryExit { epoch: 3, validator_index: 9 };

        let aggregate = signer.sign_aggregate_and_proof(&container, domain, &bytes(PK_1)).unwrap();
        let contribution = signer
            .sign_sync_committee_contribution_and_proof(&container, domain, &bytes(PK_1))
            .unwrap();
        assert_eq!(aggregate, contribution);
        assert_eq!(aggregate.signing_root, compute_signing_root(&container, domain));
    }

    #[test]
    fn test_non_slashing_duties_repeat_freely() {
        let (signer, _) = signer_with_keys(&[SK_1]);
        let domain = Hash256::repeat_byte(1);

        let first = signer.sign_slot(100, domain, &bytes(PK_1)).unwrap();
        let second = signer.sign_slot(100, domain, &bytes(PK_1)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_preconf_commitment_root() {
        let (signer, _) = signer_with_keys(&[SK_1]);
        let domain = Hash256::repeat_byte(2);
        let data = vec![0xabu8; 70];

        let response = signer.sign_preconf_commitment(&data, domain, &bytes(PK_1)).unwrap();
        let expected_root = tree_hash::merkle_root(&data, 0);
        assert_eq!(OpaqueRoot(&data).tree_hash_root(), expected_root);
        assert_eq!(response.signing_root, compute_signing_root(&OpaqueRoot(&data), domain));
        assert!(verify(PK_1, &response));
    }

    #[test]
    fn test_unknown_and_missing_accounts() {
        let (signer, _) = signer_with_keys(&[SK_1]);
        let exit = VoluntaryExit { epoch: 1, validator_index: 0 };
        let domain = root(EXIT_DOMAIN);

        let err = signer.sign_voluntary_exit(&exit, domain, &bytes(PK_3)).unwrap_err();
        assert_eq!(err.to_string(), "account not found");

        let err = signer.sign_voluntary_exit(&exit, domain, &[]).unwrap_err();
        assert!(matches!(err, SignerError::AccountNotSupplied));
    }
}
