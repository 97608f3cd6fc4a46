//! Adapter for the two durable wallet kinds
//!
//! Wraps the in-memory face of a persisted wallet store: the deterministic
//! seed (plain or crypter-wrapped), the available balance, and a key-check
//! value used to verify candidate keys without touching the seed ciphertext.
//! On-disk persistence itself lives in the owning wallet store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Amount, WalletHandle, WalletKind};
use crate::crypto::{self, AesKey, EncryptedData, KeyDerivationParams};
use crate::error::{Result, WalletError};
use crate::seed::{DeterministicSeed, KeyCrypter};

/// Known plaintext encrypted under the wallet key at encrypt time; a
/// candidate key checks out iff it decrypts this back.
const KEY_CHECK_PLAINTEXT: &[u8] = b"wallets-core key check";

pub struct DurableWallet {
    kind: WalletKind,
    inner: RwLock<WalletInner>,
}

struct WalletInner {
    seed: DeterministicSeed,
    balance: Amount,
    crypter: Option<KeyCrypter>,
    key_check: Option<EncryptedData>,
    cached_key: Option<AesKey>,
    ready: bool,
}

impl DurableWallet {
    /// Create an unencrypted, ready wallet over `seed` with `balance`
    pub fn new(kind: WalletKind, seed: DeterministicSeed, balance: Amount) -> Self {
        Self {
            kind,
            inner: RwLock::new(WalletInner {
                seed,
                balance,
                crypter: None,
                key_check: None,
                cached_key: None,
                ready: true,
            }),
        }
    }

    pub fn kind(&self) -> WalletKind {
        self.kind
    }

    /// Balance updates arrive from the owning wallet store as it syncs
    pub async fn set_balance(&self, balance: Amount) {
        self.inner.write().await.balance = balance;
    }

    pub async fn set_ready(&self, ready: bool) {
        self.inner.write().await.ready = ready;
    }

    /// Current seed value (plaintext or wrapped), for backup flows
    pub async fn seed(&self) -> DeterministicSeed {
        self.inner.read().await.seed.clone()
    }

    /// Whether a signing key is currently cached
    pub async fn has_aes_key(&self) -> bool {
        self.inner.read().await.cached_key.is_some()
    }

    fn err(&self, message: impl Into<String>) -> WalletError {
        WalletError::Wallet {
            wallet: self.kind,
            message: message.into(),
        }
    }
}

#[async_trait]
impl WalletHandle for DurableWallet {
    async fn encrypt(&self, params: &KeyDerivationParams, key: &AesKey) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.crypter.is_some() {
            return Err(self.err("already encrypted"));
        }

        // Build the full replacement state before mutating anything so a
        // failure leaves the wallet untouched.
        let crypter = KeyCrypter::new(params.clone());
        let sealed = crypter.encrypt_seed(&inner.seed, key)?;
        let key_check = crypto::encrypt(KEY_CHECK_PLAINTEXT, key)?;

        inner.seed = sealed;
        inner.crypter = Some(crypter);
        inner.key_check = Some(key_check);

        debug!(wallet = %self.kind, "wallet encrypted");
        Ok(())
    }

    async fn decrypt(&self, key: &AesKey) -> Result<()> {
        let mut inner = self.inner.write().await;
        let crypter = inner.crypter.clone().ok_or_else(|| self.err("not encrypted"))?;

        let check_ok = match &inner.key_check {
            Some(check) => crypto::decrypt(check, key)
                .map(|plain| plain == KEY_CHECK_PLAINTEXT)
                .unwrap_or(false),
            None => false,
        };
        if !check_ok {
            return Err(WalletError::WrongKey);
        }

        let unsealed = crypter.decrypt_seed(&inner.seed, key)?;

        inner.seed = unsealed;
        inner.crypter = None;
        inner.key_check = None;
        inner.cached_key = None;

        debug!(wallet = %self.kind, "wallet decrypted");
        Ok(())
    }

    async fn is_encrypted(&self) -> bool {
        self.inner.read().await.crypter.is_some()
    }

    async fn check_key(&self, key: &AesKey) -> bool {
        let inner = self.inner.read().await;
        match &inner.key_check {
            Some(check) => crypto::decrypt(check, key)
                .map(|plain| plain == KEY_CHECK_PLAINTEXT)
                .unwrap_or(false),
            None => false,
        }
    }

    async fn available_balance(&self) -> Amount {
        self.inner.read().await.balance
    }

    async fn key_crypter_params(&self) -> Option<KeyDerivationParams> {
        let inner = self.inner.read().await;
        inner.crypter.as_ref().map(|c| c.params().clone())
    }

    async fn is_ready(&self) -> bool {
        self.inner.read().await.ready
    }

    async fn seed_creation_time_secs(&self) -> u64 {
        self.inner.read().await.seed.creation_time_secs()
    }

    async fn set_aes_key(&self, key: Option<&AesKey>) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.cached_key = key.map(|k| AesKey::new(*k.as_bytes()));
        Ok(())
    }

    async fn wallet_as_string(&self, include_keys: bool) -> String {
        let inner = self.inner.read().await;
        let mut out = format!(
            "{} wallet\n  encrypted: {}\n  ready: {}\n  balance: {}\n  seed created: {}",
            self.kind,
            inner.crypter.is_some(),
            inner.ready,
            inner.balance,
            inner.seed.creation_time_secs(),
        );
        if include_keys {
            if let Some(entropy) = inner.seed.entropy() {
                out.push_str(&format!("\n  seed entropy: {}", hex::encode(entropy)));
            }
        }
        out
    }
}

impl std::fmt::Debug for DurableWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurableWallet")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
