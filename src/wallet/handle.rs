//! The capability interface every concrete wallet kind implements

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::crypto::{AesKey, KeyDerivationParams};
use crate::error::Result;

/// The concrete wallet kinds the coordinator knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletKind {
    /// Durable primary settlement wallet
    Settlement,
    /// Durable auxiliary token/asset wallet
    Asset,
    /// Ephemeral in-session trade wallet
    Trade,
}

impl std::fmt::Display for WalletKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WalletKind::Settlement => "settlement",
            WalletKind::Asset => "asset",
            WalletKind::Trade => "trade",
        };
        f.write_str(name)
    }
}

/// Wallet balance in the smallest unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn new(value: u64) -> Self {
        Amount(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn saturating_add(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Uniform operations over one concrete wallet.
///
/// `encrypt` and `decrypt` are all-or-nothing for the single wallet: on
/// error the wallet's stored state is unchanged. `check_key` never mutates
/// stored ciphertext.
#[async_trait]
pub trait WalletHandle: Send + Sync {
    /// Encrypt this wallet's key material under `key`, recording `params`
    /// so the key can be re-derived later. Fails if already encrypted.
    async fn encrypt(&self, params: &KeyDerivationParams, key: &AesKey) -> Result<()>;

    /// Decrypt this wallet's key material. Fails with `WrongKey` when the
    /// candidate key does not verify, or if the wallet is not encrypted.
    async fn decrypt(&self, key: &AesKey) -> Result<()>;

    async fn is_encrypted(&self) -> bool;

    /// Cheap derivation-based comparison against the stored key-check value
    async fn check_key(&self, key: &AesKey) -> bool;

    async fn available_balance(&self) -> Amount;

    /// The parameters that produced the current key, `None` when unencrypted
    async fn key_crypter_params(&self) -> Option<KeyDerivationParams>;

    /// Whether the backing store is loaded and the wallet usable
    async fn is_ready(&self) -> bool;

    async fn seed_creation_time_secs(&self) -> u64;

    /// Cache (or clear, with `None`) the signing key for later use
    async fn set_aes_key(&self, key: Option<&AesKey>) -> Result<()>;

    /// Diagnostic dump. The wallet's own formatter omits private key
    /// material unless `include_keys` is set.
    async fn wallet_as_string(&self, include_keys: bool) -> String;
}
