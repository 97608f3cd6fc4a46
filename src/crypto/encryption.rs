//! AES-256-GCM authenticated encryption
//!
//! Used by the wallet adapters to wrap seed entropy and to produce the
//! key-check value a candidate key is verified against. The GCM auth tag is
//! kept appended to the ciphertext.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::AesKey;
use crate::error::{Result, WalletError};

/// Nonce length: 12 bytes (96 bits), standard for GCM
const NONCE_LEN: usize = 12;

/// Ciphertext with its nonce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    /// Random nonce (12 bytes for GCM)
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext with the 16-byte auth tag appended
    pub ciphertext: Vec<u8>,
}

impl std::fmt::Display for EncryptedData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", hex::encode(self.nonce), hex::encode(&self.ciphertext))
    }
}

/// Encrypt plaintext under `key` with a fresh random nonce
pub fn encrypt(plaintext: &[u8], key: &AesKey) -> Result<EncryptedData> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| WalletError::Encryption(e.to_string()))?;

    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| WalletError::Encryption(e.to_string()))?;

    Ok(EncryptedData { nonce, ciphertext })
}

/// Decrypt and authenticate ciphertext under `key`
pub fn decrypt(data: &EncryptedData, key: &AesKey) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| WalletError::Decryption(e.to_string()))?;

    cipher
        .decrypt(Nonce::from_slice(&data.nonce), data.ciphertext.as_slice())
        .map_err(|e| WalletError::Decryption(e.to_string()))
}
