use thiserror::Error;

pub mod bls;
pub use bls::{PublicKey, SecretKey, Signature, ETH2_DST};

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid secret key")]
    InvalidSecretKey,

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
