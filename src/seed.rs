//! Deterministic seed values and the key crypter that wraps them
//!
//! A seed is immutable: decrypting or encrypting one produces a new seed
//! value with the same creation timestamp, the input is never touched.

use zeroize::Zeroizing;

use crate::crypto::{self, AesKey, EncryptedData, KeyDerivationParams};
use crate::error::{Result, WalletError};

/// Deterministic seed bytes plus creation timestamp.
///
/// The payload is either plaintext entropy (zeroized on drop) or a
/// ciphertext produced by a [`KeyCrypter`].
#[derive(Clone)]
pub struct DeterministicSeed {
    payload: SeedPayload,
    creation_time_secs: u64,
}

#[derive(Clone)]
enum SeedPayload {
    Plain(Zeroizing<Vec<u8>>),
    Encrypted(EncryptedData),
}

impl DeterministicSeed {
    /// Create a plaintext seed
    pub fn new(entropy: Vec<u8>, creation_time_secs: u64) -> Self {
        Self {
            payload: SeedPayload::Plain(Zeroizing::new(entropy)),
            creation_time_secs,
        }
    }

    /// Create a seed from ciphertext produced by a [`KeyCrypter`]
    pub fn from_encrypted(data: EncryptedData, creation_time_secs: u64) -> Self {
        Self {
            payload: SeedPayload::Encrypted(data),
            creation_time_secs,
        }
    }

    pub fn is_encrypted(&self) -> bool {
        matches!(self.payload, SeedPayload::Encrypted(_))
    }

    pub fn creation_time_secs(&self) -> u64 {
        self.creation_time_secs
    }

    /// Plaintext entropy, `None` when the seed is encrypted
    pub fn entropy(&self) -> Option<&[u8]> {
        match &self.payload {
            SeedPayload::Plain(entropy) => Some(entropy.as_slice()),
            SeedPayload::Encrypted(_) => None,
        }
    }

    /// Ciphertext, `None` when the seed is plaintext
    pub fn encrypted_data(&self) -> Option<&EncryptedData> {
        match &self.payload {
            SeedPayload::Plain(_) => None,
            SeedPayload::Encrypted(data) => Some(data),
        }
    }
}

impl std::fmt::Debug for DeterministicSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let payload = match self.payload {
            SeedPayload::Plain(_) => "Plain([REDACTED])",
            SeedPayload::Encrypted(_) => "Encrypted(..)",
        };
        f.debug_struct("DeterministicSeed")
            .field("payload", &payload)
            .field("creation_time_secs", &self.creation_time_secs)
            .finish()
    }
}

/// Key derivation parameters plus the AES-GCM wrap/unwrap they parameterize
#[derive(Debug, Clone)]
pub struct KeyCrypter {
    params: KeyDerivationParams,
}

impl KeyCrypter {
    pub fn new(params: KeyDerivationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &KeyDerivationParams {
        &self.params
    }

    /// Derive the key for `passphrase` under this crypter's parameters
    pub fn derive_key(&self, passphrase: &str) -> Result<AesKey> {
        crypto::derive_key(passphrase, &self.params)
    }

    /// Wrap a plaintext seed, returning a new encrypted seed value
    pub fn encrypt_seed(&self, seed: &DeterministicSeed, key: &AesKey) -> Result<DeterministicSeed> {
        let entropy = seed
            .entropy()
            .ok_or_else(|| WalletError::Encryption("seed is already encrypted".to_string()))?;
        let data = crypto::encrypt(entropy, key)?;
        Ok(DeterministicSeed::from_encrypted(data, seed.creation_time_secs()))
    }

    /// Unwrap an encrypted seed, returning a new plaintext seed value.
    /// An authentication failure means the key is wrong.
    pub fn decrypt_seed(&self, seed: &DeterministicSeed, key: &AesKey) -> Result<DeterministicSeed> {
        let data = seed
            .encrypted_data()
            .ok_or_else(|| WalletError::Decryption("seed is not encrypted".to_string()))?;
        let entropy = crypto::decrypt(data, key).map_err(|_| WalletError::WrongKey)?;
        Ok(DeterministicSeed::new(entropy, seed.creation_time_secs()))
    }
}

/// Outcome of a seed decryption request.
///
/// "No crypter present" is a legitimate state (the seed was never
/// encrypted), so it gets its own variant instead of an empty result that
/// callers could mistake for a failure.
#[derive(Debug)]
pub enum SeedDecryption {
    /// The seed was encrypted and has been decrypted
    Decrypted(DeterministicSeed),
    /// No crypter present, the seed was already plaintext
    AlreadyPlaintext(DeterministicSeed),
}

impl SeedDecryption {
    pub fn into_seed(self) -> DeterministicSeed {
        match self {
            SeedDecryption::Decrypted(seed) | SeedDecryption::AlreadyPlaintext(seed) => seed,
        }
    }

    pub fn was_encrypted(&self) -> bool {
        matches!(self, SeedDecryption::Decrypted(_))
    }
}
