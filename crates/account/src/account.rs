use crate::{AccountError, Result};
use ethereum_crypto::SecretKey;
use ethereum_types::{PublicKeyBytes, SignatureBytes};
use uuid::Uuid;

/// A validator key able to sign consensus signing roots.
pub trait ValidatorAccount: Send + Sync {
    fn id(&self) -> Uuid;

    fn name(&self) -> &str;

    fn validator_public_key(&self) -> PublicKeyBytes;

    /// Sign a 32-byte signing root with the validation key.
    fn validation_key_sign(&self, data: &[u8]) -> Result<SignatureBytes>;
}

/// Validator account backed by an in-memory BLS secret key.
#[derive(Debug)]
pub struct BlsAccount {
    id: Uuid,
    name: String,
    secret_key: SecretKey,
    public_key: PublicKeyBytes,
}

impl BlsAccount {
    pub fn new(name: impl Into<String>, secret_key: SecretKey) -> Self {
        let public_key = secret_key.public_key().compress();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            secret_key,
            public_key,
        }
    }

    /// Create an account with a freshly generated key
    pub fn random(name: impl Into<String>) -> Result<Self> {
        Ok(Self::new(name, SecretKey::random()?))
    }

    /// Import from a hex-encoded 32-byte secret key (optional `0x` prefix)
    pub fn from_secret_key_hex(name: impl Into<String>, hex_key: &str) -> Result<Self> {
        let bytes = hex::decode(hex_key.trim_start_matches("0x"))
            .map_err(|e| AccountError::InvalidSecretKey(e.to_string()))?;
        let secret_key = SecretKey::from_bytes(&bytes)?;
        Ok(Self::new(name, secret_key))
    }
}

impl ValidatorAccount for BlsAccount {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn validator_public_key(&self) -> PublicKeyBytes {
        self.public_key
    }

    fn validation_key_sign(&self, data: &[u8]) -> Result<SignatureBytes> {
        if data.is_empty() {
            return Err(AccountError::SigningError("nothing to sign".to_string()));
        }
        Ok(self.secret_key.sign(data).compress())
    }
}
