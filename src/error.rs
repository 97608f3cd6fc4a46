//! Error types for wallets-core

use thiserror::Error;

use crate::wallet::WalletKind;

/// Result type alias for wallet operations
pub type Result<T> = std::result::Result<T, WalletError>;

/// Wallet error types
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("wallets are already encrypted")]
    AlreadyEncrypted,

    #[error("wallets are not encrypted")]
    NotEncrypted,

    #[error("AES key does not match the stored wallet key")]
    WrongKey,

    #[error(
        "wallet set is split: {wallet} wallet left encrypted={encrypted}, \
         rollback failed ({cause}) - manual recovery required"
    )]
    PartialState {
        wallet: WalletKind,
        encrypted: bool,
        cause: String,
    },

    #[error("durable wallets disagree on encryption state (settlement={settlement}, asset={asset})")]
    InvariantViolation { settlement: bool, asset: bool },

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("{wallet} wallet error: {message}")]
    Wallet { wallet: WalletKind, message: String },

    #[error("wallet setup error: {0}")]
    Setup(String),
}
