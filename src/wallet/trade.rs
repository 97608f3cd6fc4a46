//! Raw key slot for the ephemeral trade wallet
//!
//! The trade wallet is never independently encrypted; while trades are
//! active it works with the raw key directly. The holder tracks whether a
//! key is currently set and is cleared whenever the durable wallets are
//! decrypted.

use tracing::debug;

use crate::crypto::AesKey;

#[derive(Default)]
pub struct TradeKeyHolder {
    key: Option<AesKey>,
}

impl TradeKeyHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of the session key
    pub fn set(&mut self, key: AesKey) {
        self.key = Some(key);
        debug!("trade key set");
    }

    /// Drop the session key; the `AesKey` zeroizes itself
    pub fn clear(&mut self) {
        if self.key.take().is_some() {
            debug!("trade key cleared");
        }
    }

    pub fn is_set(&self) -> bool {
        self.key.is_some()
    }

    pub fn key(&self) -> Option<&AesKey> {
        self.key.as_ref()
    }
}

impl std::fmt::Debug for TradeKeyHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradeKeyHolder")
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
