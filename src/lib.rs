//! # wallets-core
//!
//! Coordinated encryption lifecycle for a set of independently persisted
//! cryptocurrency wallets, so that a single user-supplied secret protects
//! all of them consistently:
//! - scrypt key derivation from a passphrase, with parameters reused so
//!   re-derivation is deterministic
//! - a capability trait implemented once per concrete wallet kind
//! - a coordinator enforcing the shared-state invariant across the durable
//!   wallets, with rollback-or-escalate on partial failures
//! - an ephemeral trade key holder with zeroize-on-drop key hygiene
//!
//! On-disk wallet persistence, transaction validation, and network sync are
//! external collaborators and stay out of this crate.

pub mod crypto;
pub mod error;
pub mod seed;
pub mod setup;
pub mod wallet;

mod coordinator;

pub use coordinator::{SplitState, WalletCoordinator};
pub use crypto::{derive_key, AesKey, EncryptedData, KeyDerivationParams};
pub use error::{Result, WalletError};
pub use seed::{DeterministicSeed, KeyCrypter, SeedDecryption};
pub use setup::SetupOrchestrator;
pub use wallet::{Amount, DurableWallet, TradeKeyHolder, WalletHandle, WalletKind};
