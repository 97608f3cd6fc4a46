//! Passphrase-based key derivation using scrypt
//!
//! The parameters that produced a wallet's current key are stored alongside
//! the wallet and reused on unlock, so re-derivation with the same passphrase
//! reproduces the same key.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::AesKey;
use crate::error::{Result, WalletError};

/// Derived key length: 32 bytes = AES-256
const KEY_LEN: usize = 32;
/// Salt length in bytes
const SALT_LEN: usize = 16;

/// Parameters for scrypt key derivation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDerivationParams {
    /// Cost factor as log2(N) (default: 15, i.e. N = 32768)
    pub log_n: u8,
    /// Block size `r` (default: 8)
    pub block_size: u32,
    /// Parallelization factor `p` (default: 1)
    pub parallelism: u32,
    /// Random salt
    pub salt: Vec<u8>,
}

impl KeyDerivationParams {
    pub const DEFAULT_LOG_N: u8 = 15;
    pub const DEFAULT_BLOCK_SIZE: u32 = 8;
    pub const DEFAULT_PARALLELISM: u32 = 1;

    /// Generate default-cost parameters with a fresh random salt
    pub fn generate() -> Self {
        let mut salt = vec![0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        Self {
            log_n: Self::DEFAULT_LOG_N,
            block_size: Self::DEFAULT_BLOCK_SIZE,
            parallelism: Self::DEFAULT_PARALLELISM,
            salt,
        }
    }

    /// Low-cost parameters so tests do not burn CPU on scrypt
    #[cfg(test)]
    pub(crate) fn fast_for_tests() -> Self {
        let mut salt = vec![0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        Self {
            log_n: 8,
            block_size: 4,
            parallelism: 1,
            salt,
        }
    }
}

/// Derive a 256-bit wallet key from a passphrase using scrypt
pub fn derive_key(passphrase: &str, params: &KeyDerivationParams) -> Result<AesKey> {
    let scrypt_params = scrypt::Params::new(
        params.log_n,
        params.block_size,
        params.parallelism,
        KEY_LEN,
    )
    .map_err(|e| WalletError::KeyDerivation(e.to_string()))?;

    let mut output = [0u8; KEY_LEN];
    scrypt::scrypt(
        passphrase.as_bytes(),
        &params.salt,
        &scrypt_params,
        &mut output,
    )
    .map_err(|e| WalletError::KeyDerivation(e.to_string()))?;

    let key = AesKey::new(output);
    output.zeroize();
    Ok(key)
}
