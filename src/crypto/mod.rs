//! Cryptographic primitives shared by the wallet adapters
//!
//! This module provides:
//! - scrypt key derivation from a user passphrase
//! - AES-256-GCM authenticated encryption for seed wrapping and key checks
//! - Secure key handling with zeroize

mod encryption;
mod key_derivation;
mod secure_memory;

pub use encryption::{decrypt, encrypt, EncryptedData};
pub use key_derivation::{derive_key, KeyDerivationParams};
pub use secure_memory::AesKey;
