use ethereum_crypto::CryptoError;
use thiserror::Error;

pub mod account;
pub mod wallet;

pub use account::{BlsAccount, ValidatorAccount};
pub use wallet::{NdWallet, Wallet};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("account not found")]
    AccountNotFound,

    #[error("account already exists: {0}")]
    AccountExists(String),

    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    #[error("signing error: {0}")]
    SigningError(String),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

pub type Result<T> = std::result::Result<T, AccountError>;
