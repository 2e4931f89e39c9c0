//! BLS12-381 keys and signatures using the Ethereum consensus ciphersuite
//! (public keys in G1, signatures in G2, proof-of-possession DST).

use crate::{CryptoError, Result};
use blst::min_pk;
use blst::BLST_ERROR;
use ethereum_types::{PublicKeyBytes, SignatureBytes};
use rand::RngCore;
use std::fmt;

/// Domain separation tag of the proof-of-possession ciphersuite.
pub const ETH2_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

pub const SECRET_KEY_BYTES_LEN: usize = 32;

#[derive(Clone)]
pub struct SecretKey(min_pk::SecretKey);

impl SecretKey {
    /// Generate a fresh key from 32 bytes of OS randomness.
    pub fn random() -> Result<Self> {
        let mut ikm = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut ikm);
        min_pk::SecretKey::key_gen(&ikm, &[])
            .map(Self)
            .map_err(|e| CryptoError::KeyGeneration(format!("{:?}", e)))
    }

    /// Deserialize a big-endian 32-byte scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SECRET_KEY_BYTES_LEN {
            return Err(CryptoError::InvalidSecretKey);
        }
        min_pk::SecretKey::from_bytes(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidSecretKey)
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.sk_to_pk())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.0.sign(message, ETH2_DST, &[]))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(min_pk::PublicKey);

impl PublicKey {
    /// Deserialize and subgroup-check a compressed public key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        min_pk::PublicKey::key_validate(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    pub fn compress(&self) -> PublicKeyBytes {
        PublicKeyBytes::from_bytes(self.0.compress())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.compress())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Signature(min_pk::Signature);

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        min_pk::Signature::from_bytes(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidSignature)
    }

    pub fn compress(&self) -> SignatureBytes {
        SignatureBytes::from_bytes(self.0.compress())
    }

    pub fn verify(&self, message: &[u8], public_key: &PublicKey) -> bool {
        self.0.verify(true, message, ETH2_DST, &[], &public_key.0, true) == BLST_ERROR::BLST_SUCCESS
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.compress())
    }
}
