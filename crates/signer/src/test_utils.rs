use crate::SimpleSigner;
use ethereum_account::{BlsAccount, NdWallet};
use ethereum_slashing_protection::{new_protector, ProtectionMode};
use ethereum_storage::{DatabaseSlashingStore, MemoryDatabase, SlashingStore};
use ethereum_types::{AttestationData, Checkpoint, Hash256, Network, Slot};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const SK_1: &str = "2c083f2c8fc923fa2bd32a70ab72b4b46247e8c1f347adc30b2f8036a355086c";
pub const PK_1: &str = "a9cf360aa15fb1d1d30ee2b578dc5884823c19661886ae8b892775ccb3bd96b7d7345569a2aa0b14e4d015c54a6a0c54";
pub const SK_2: &str = "6327b1e58c41d60dd7c3c8b9634204255707c2d12e2513c345001d8926745eea";
pub const PK_2: &str = "954eb88ed1207f891dc3c28fa6cfdf8f53bf0ed3d838f3476c0900a61314d22d4f0a300da3cd010444dd5183e35a593c";
pub const SK_3: &str = "5470813f7deef638dc531188ca89e36976d536f680e89849cd9077fd096e20bc";
pub const PK_3: &str = "a3862121db5914d7272b0b705e6e3c5336b79e316735661873566245207329c30f9a33d4fb5f5857fc6fd0a368186972";

pub const SK_4: &str = "659e875e1b062c03f2f2a57332974d475b97df6cfc581d322e79642d39aca8fd";
pub const PK_4: &str = "a27c45f7afe6c63363acf886cdad282539fb2cf58b304f2caa95f2ea53048b65a5d41d926c3562e3f18b8b61871375af";

pub const BLOCK_ROOT: &str = "3a43a4bf26fb5947e809c1f24f7dc6857c8ac007e535d48e6e4eca2122fd776b";

/// In-memory store that counts calls and can stall reads to widen race windows.
pub struct SpyStore {
    inner: DatabaseSlashingStore<MemoryDatabase>,
    calls: AtomicUsize,
    read_delay: Option<Duration>,
}

impl SpyStore {
    pub fn new() -> Self {
        Self {
            inner: DatabaseSlashingStore::new(Arc::new(MemoryDatabase::new())),
            calls: AtomicUsize::new(0),
            read_delay: None,
        }
    }

    pub fn slow(read_delay: Duration) -> Self {
        Self { read_delay: Some(read_delay), ..Self::new() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }

    fn record(&self, is_read: bool) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if is_read {
            if let Some(delay) = self.read_delay {
                std::thread::sleep(delay);
            }
        }
    }
}

impl SlashingStore for SpyStore {
    fn save_highest_attestation(&self, pubkey: &[u8], attestation: &AttestationData) -> ethereum_storage::Result<()> {
        self.record(false);
        self.inner.save_highest_attestation(pubkey, attestation)
    }

    fn retrieve_highest_attestation(&self, pubkey: &[u8]) -> ethereum_storage::Result<Option<AttestationData>> {
        self.record(true);
        self.inner.retrieve_highest_attestation(pubkey)
    }

    fn save_highest_proposal(&self, pubkey: &[u8], slot: Slot) -> ethereum_storage::Result<()> {
        self.record(false);
        self.inner.save_highest_proposal(pubkey, slot)
    }

    fn retrieve_highest_proposal(&self, pubkey: &[u8]) -> ethereum_storage::Result<Option<Slot>> {
        self.record(true);
        self.inner.retrieve_highest_proposal(pubkey)
    }
}

pub fn bytes(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).unwrap()
}

pub fn root(hex_str: &str) -> Hash256 {
    Hash256::from_slice(&bytes(hex_str))
}

/// Wallet with one account per key, named by position.
pub fn wallet_with_keys(secret_keys: &[&str]) -> Arc<NdWallet> {
    let wallet = NdWallet::new("test");
    for (i, sk) in secret_keys.iter().enumerate() {
        let account = BlsAccount::from_secret_key_hex(i.to_string(), sk).unwrap();
        wallet.add_account(Arc::new(account)).unwrap();
    }
    Arc::new(wallet)
}

pub fn signer_with(secret_keys: &[&str], store: Arc<SpyStore>, mode: ProtectionMode) -> SimpleSigner {
    let protector = new_protector(mode, store);
    SimpleSigner::new(wallet_with_keys(secret_keys), protector, Arc::new(Network::Mainnet))
}

/// Normal protection over a spying in-memory store.
pub fn signer_with_keys(secret_keys: &[&str]) -> (SimpleSigner, Arc<SpyStore>) {
    let store = Arc::new(SpyStore::new());
    (signer_with(secret_keys, store.clone(), ProtectionMode::Normal), store)
}

pub fn attestation(source: u64, target: u64) -> AttestationData {
    AttestationData {
        slot: target * 32,
        index: 0,
        beacon_block_root: root(BLOCK_ROOT),
        source: Checkpoint::new(source, Hash256::ZERO),
        target: Checkpoint::new(target, root(BLOCK_ROOT)),
    }
}

/// Seed both watermarks for `pubkey`.
pub fn seed(store: &SpyStore, pubkey: &[u8], source: u64, target: u64, slot: Slot) {
    store.save_highest_attestation(pubkey, &attestation(source, target)).unwrap();
    store.save_highest_proposal(pubkey, slot).unwrap();
    store.reset_calls();
}
