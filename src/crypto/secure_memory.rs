//! Secure key handling with automatic zeroization

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric wallet encryption key - automatically zeroed when dropped.
///
/// Deliberately not `Clone`: the key has a single conceptual holder at any
/// time (the coordinator during a call, the trade key holder between trades).
/// A component that intentionally retains the key must copy the bytes out
/// explicitly via [`AesKey::new`].
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct AesKey {
    key: [u8; 32],
}

impl AesKey {
    /// Create a new key from raw bytes
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Get the key bytes (use carefully - avoid copying)
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.key
    }

    /// Create from a slice (must be exactly 32 bytes)
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != 32 {
            return None;
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(slice);
        Some(Self { key })
    }
}

impl PartialEq for AesKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for AesKey {}

impl std::fmt::Debug for AesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
