//! Cross-wallet encryption coordination
//!
//! The coordinator is the only component with cross-wallet invariants: the
//! two durable wallets must always agree on their encrypted flag. Every
//! multi-wallet mutation follows a rollback-or-escalate protocol so a
//! partial failure never silently leaves the wallet set split.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::crypto::{AesKey, KeyDerivationParams};
use crate::error::{Result, WalletError};
use crate::seed::{DeterministicSeed, KeyCrypter, SeedDecryption};
use crate::setup::SetupOrchestrator;
use crate::wallet::{TradeKeyHolder, WalletHandle, WalletKind};

/// Record of a partially applied multi-wallet operation whose rollback
/// failed: `wallet` was left with the given encrypted flag while its peer
/// holds the opposite one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitState {
    pub wallet: WalletKind,
    pub encrypted: bool,
}

struct CoordinatorState {
    trade_key: TradeKeyHolder,
    split: Option<SplitState>,
}

/// Coordinates the encryption lifecycle of the settlement, asset, and
/// ephemeral trade wallets under a single user-supplied key.
///
/// Mutations (`encrypt_wallets`, `decrypt_wallets`, `set_aes_key`) hold an
/// exclusive lock across both durable sub-calls including any rollback, so
/// no other task can observe an intermediate split state. Read-only queries
/// share the lock and may run concurrently with each other.
pub struct WalletCoordinator {
    settlement: Arc<dyn WalletHandle>,
    asset: Arc<dyn WalletHandle>,
    setup: Arc<dyn SetupOrchestrator>,
    state: RwLock<CoordinatorState>,
}

impl WalletCoordinator {
    pub fn new(
        settlement: Arc<dyn WalletHandle>,
        asset: Arc<dyn WalletHandle>,
        setup: Arc<dyn SetupOrchestrator>,
    ) -> Self {
        Self {
            settlement,
            asset,
            setup,
            state: RwLock::new(CoordinatorState {
                trade_key: TradeKeyHolder::new(),
                split: None,
            }),
        }
    }

    /// Encrypt the asset wallet, then the settlement wallet, under the same
    /// `(params, key)` pair. On full success the key moves into the trade
    /// key holder so active trades can use it without a password prompt.
    ///
    /// If the settlement encryption fails after the asset one succeeded, the
    /// asset wallet is decrypted back; if that rollback also fails the set
    /// is latched split and a `PartialState` error names the wallet left
    /// encrypted.
    pub async fn encrypt_wallets(&self, params: KeyDerivationParams, key: AesKey) -> Result<()> {
        let mut state = self.state.write().await;
        self.reject_if_split(&state).await?;

        if self.consistent_encrypted_flag().await? {
            return Err(WalletError::AlreadyEncrypted);
        }

        self.asset.encrypt(&params, &key).await?;

        if let Err(cause) = self.settlement.encrypt(&params, &key).await {
            warn!(%cause, "settlement wallet encryption failed, rolling back asset wallet");
            return match self.asset.decrypt(&key).await {
                Ok(()) => {
                    info!("asset wallet rolled back to unencrypted");
                    Err(cause)
                }
                Err(rollback_err) => {
                    let split = SplitState {
                        wallet: WalletKind::Asset,
                        encrypted: true,
                    };
                    state.split = Some(split);
                    warn!(%rollback_err, "rollback failed, wallet set is split");
                    Err(WalletError::PartialState {
                        wallet: split.wallet,
                        encrypted: split.encrypted,
                        cause: format!("{cause}; rollback: {rollback_err}"),
                    })
                }
            };
        }

        state.trade_key.set(key);
        info!("wallet set encrypted");
        Ok(())
    }

    /// Decrypt the asset wallet, then the settlement wallet. The candidate
    /// key is verified first, and the trade key holder is cleared on success
    /// so no plaintext key material outlives the unlock.
    pub async fn decrypt_wallets(&self, key: &AesKey) -> Result<()> {
        let mut state = self.state.write().await;
        self.reject_if_split(&state).await?;

        if !self.consistent_encrypted_flag().await? {
            return Err(WalletError::NotEncrypted);
        }
        if !self.settlement.check_key(key).await {
            return Err(WalletError::WrongKey);
        }

        // Captured before the mutation so a failed settlement decrypt can
        // re-encrypt the asset wallet deterministically.
        let asset_params = self.asset.key_crypter_params().await;

        self.asset.decrypt(key).await?;

        if let Err(cause) = self.settlement.decrypt(key).await {
            warn!(%cause, "settlement wallet decryption failed, re-encrypting asset wallet");
            let rollback = match &asset_params {
                Some(params) => self.asset.encrypt(params, key).await,
                None => Err(WalletError::Wallet {
                    wallet: WalletKind::Asset,
                    message: "no key crypter params recorded for rollback".to_string(),
                }),
            };
            return match rollback {
                Ok(()) => {
                    info!("asset wallet rolled back to encrypted");
                    Err(cause)
                }
                Err(rollback_err) => {
                    let split = SplitState {
                        wallet: WalletKind::Asset,
                        encrypted: false,
                    };
                    state.split = Some(split);
                    warn!(%rollback_err, "rollback failed, wallet set is split");
                    Err(WalletError::PartialState {
                        wallet: split.wallet,
                        encrypted: split.encrypted,
                        cause: format!("{cause}; rollback: {rollback_err}"),
                    })
                }
            };
        }

        state.trade_key.clear();
        info!("wallet set decrypted");
        Ok(())
    }

    /// Conjunction of both durable wallets' encrypted flags. Disagreement is
    /// an invariant violation, never a silent `false`.
    pub async fn are_wallets_encrypted(&self) -> Result<bool> {
        let _state = self.state.read().await;
        self.consistent_encrypted_flag().await
    }

    /// Both durable wallets ready for use
    pub async fn are_wallets_available(&self) -> bool {
        let _state = self.state.read().await;
        self.settlement.is_ready().await && self.asset.is_ready().await
    }

    /// Verify a candidate key against the settlement wallet only; once both
    /// wallets are encrypted they share the same key by construction, so
    /// re-checking the asset wallet on the unlock path is redundant.
    pub async fn check_aes_key(&self, key: &AesKey) -> bool {
        let _state = self.state.read().await;
        self.settlement.check_key(key).await
    }

    /// The in-use derivation parameters when encrypted, so re-derivation
    /// with the same passphrase reproduces the same key; otherwise freshly
    /// generated defaults for first-time setup.
    pub async fn key_crypter_params(&self) -> KeyDerivationParams {
        let _state = self.state.read().await;
        if self.settlement.is_encrypted().await && self.asset.is_encrypted().await {
            if let Some(params) = self.settlement.key_crypter_params().await {
                return params;
            }
        }
        KeyDerivationParams::generate()
    }

    pub async fn chain_seed_creation_time_secs(&self) -> u64 {
        let _state = self.state.read().await;
        self.settlement.seed_creation_time_secs().await
    }

    /// Whether the durable wallets hold any spendable funds. The trade
    /// wallet custodies no independent balance and is never inspected.
    pub async fn has_positive_balance(&self) -> bool {
        let _state = self.state.read().await;
        let settlement = self.settlement.available_balance().await;
        let asset = self.asset.available_balance().await;
        settlement.saturating_add(asset).is_positive()
    }

    /// Propagate the same key to the settlement wallet, asset wallet, and
    /// trade key holder without checking prior encryption state. Callers
    /// verify the key via [`check_aes_key`](Self::check_aes_key) first.
    pub async fn set_aes_key(&self, key: AesKey) -> Result<()> {
        let mut state = self.state.write().await;
        self.settlement.set_aes_key(Some(&key)).await?;
        self.asset.set_aes_key(Some(&key)).await?;
        state.trade_key.set(key);
        Ok(())
    }

    /// Decrypt `seed` with `crypter`, leaving the input unchanged. A missing
    /// crypter on a plaintext seed means the seed was never encrypted and
    /// yields [`SeedDecryption::AlreadyPlaintext`]; a missing crypter on an
    /// encrypted seed is caller misuse.
    pub async fn get_decrypted_seed(
        &self,
        key: &AesKey,
        seed: &DeterministicSeed,
        crypter: Option<&KeyCrypter>,
    ) -> Result<SeedDecryption> {
        match crypter {
            Some(crypter) => Ok(SeedDecryption::Decrypted(crypter.decrypt_seed(seed, key)?)),
            None if seed.is_encrypted() => Err(WalletError::Decryption(
                "encrypted seed requires a key crypter".to_string(),
            )),
            None => Ok(SeedDecryption::AlreadyPlaintext(seed.clone())),
        }
    }

    /// Diagnostic dump of both durable wallets via their own formatters
    pub async fn wallets_as_string(&self, include_keys: bool) -> String {
        let _state = self.state.read().await;
        format!(
            "Settlement wallet:\n{}\n\nAsset wallet:\n{}",
            self.settlement.wallet_as_string(include_keys).await,
            self.asset.wallet_as_string(include_keys).await,
        )
    }

    /// Whether an ephemeral trade session key is currently held
    pub async fn has_trade_key(&self) -> bool {
        self.state.read().await.trade_key.is_set()
    }

    /// The latched split state, if a failed rollback left one behind
    pub async fn split_state(&self) -> Option<SplitState> {
        self.state.read().await.split
    }

    /// Operator hook after out-of-band repair of a split wallet set: clears
    /// the latch only once both durable wallets agree again.
    pub async fn resolve_split_state(&self) -> Result<()> {
        let mut state = self.state.write().await;
        let settlement = self.settlement.is_encrypted().await;
        let asset = self.asset.is_encrypted().await;
        if settlement != asset {
            return Err(WalletError::InvariantViolation { settlement, asset });
        }
        state.split = None;
        info!("split state resolved");
        Ok(())
    }

    // Pass-through to the setup orchestrator.

    pub async fn restore_seed_words(&self, seed: Option<DeterministicSeed>) -> Result<()> {
        self.setup.restore_seed_words(seed).await
    }

    pub async fn backup_wallets(&self) -> Result<()> {
        self.setup.backup_wallets().await
    }

    pub async fn clear_backup(&self) -> Result<()> {
        self.setup.clear_backups().await
    }

    async fn reject_if_split(&self, state: &CoordinatorState) -> Result<()> {
        if state.split.is_some() {
            let settlement = self.settlement.is_encrypted().await;
            let asset = self.asset.is_encrypted().await;
            return Err(WalletError::InvariantViolation { settlement, asset });
        }
        Ok(())
    }

    async fn consistent_encrypted_flag(&self) -> Result<bool> {
        let settlement = self.settlement.is_encrypted().await;
        let asset = self.asset.is_encrypted().await;
        if settlement != asset {
            return Err(WalletError::InvariantViolation { settlement, asset });
        }
        Ok(settlement)
    }
}

impl std::fmt::Debug for WalletCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletCoordinator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::wallet::{Amount, DurableWallet};

    /// Delegates to a real durable wallet but fails on command, to drive
    /// the rollback paths.
    struct FlakyWallet {
        inner: DurableWallet,
        fail_encrypt: AtomicBool,
        fail_decrypt: AtomicBool,
    }

    impl FlakyWallet {
        fn new(inner: DurableWallet) -> Self {
            Self {
                inner,
                fail_encrypt: AtomicBool::new(false),
                fail_decrypt: AtomicBool::new(false),
            }
        }

        fn fail_encrypt(&self, fail: bool) {
            self.fail_encrypt.store(fail, Ordering::SeqCst);
        }

        fn fail_decrypt(&self, fail: bool) {
            self.fail_decrypt.store(fail, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl WalletHandle for FlakyWallet {
        async fn encrypt(&self, params: &KeyDerivationParams, key: &AesKey) -> Result<()> {
            if self.fail_encrypt.load(Ordering::SeqCst) {
                return Err(WalletError::Wallet {
                    wallet: self.inner.kind(),
                    message: "injected encrypt failure".to_string(),
                });
            }
            self.inner.encrypt(params, key).await
        }

        async fn decrypt(&self, key: &AesKey) -> Result<()> {
            if self.fail_decrypt.load(Ordering::SeqCst) {
                return Err(WalletError::Wallet {
                    wallet: self.inner.kind(),
                    message: "injected decrypt failure".to_string(),
                });
            }
            self.inner.decrypt(key).await
        }

        async fn is_encrypted(&self) -> bool {
            self.inner.is_encrypted().await
        }

        async fn check_key(&self, key: &AesKey) -> bool {
            self.inner.check_key(key).await
        }

        async fn available_balance(&self) -> Amount {
            self.inner.available_balance().await
        }

        async fn key_crypter_params(&self) -> Option<KeyDerivationParams> {
            self.inner.key_crypter_params().await
        }

        async fn is_ready(&self) -> bool {
            self.inner.is_ready().await
        }

        async fn seed_creation_time_secs(&self) -> u64 {
            self.inner.seed_creation_time_secs().await
        }

        async fn set_aes_key(&self, key: Option<&AesKey>) -> Result<()> {
            self.inner.set_aes_key(key).await
        }

        async fn wallet_as_string(&self, include_keys: bool) -> String {
            self.inner.wallet_as_string(include_keys).await
        }
    }

    #[derive(Default)]
    struct RecordingSetup {
        restores: AtomicUsize,
        backups: AtomicUsize,
        clears: AtomicUsize,
    }

    #[async_trait]
    impl SetupOrchestrator for RecordingSetup {
        async fn restore_seed_words(&self, _seed: Option<DeterministicSeed>) -> Result<()> {
            self.restores.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn backup_wallets(&self) -> Result<()> {
            self.backups.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn clear_backups(&self) -> Result<()> {
            self.clears.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn settlement_wallet(balance: u64) -> DurableWallet {
        DurableWallet::new(
            WalletKind::Settlement,
            DeterministicSeed::new(vec![0x11; 32], 1_600_000_000),
            Amount::new(balance),
        )
    }

    fn asset_wallet(balance: u64) -> DurableWallet {
        DurableWallet::new(
            WalletKind::Asset,
            DeterministicSeed::new(vec![0x22; 32], 1_600_000_100),
            Amount::new(balance),
        )
    }

    struct Fixture {
        coordinator: WalletCoordinator,
        settlement: Arc<FlakyWallet>,
        asset: Arc<FlakyWallet>,
        setup: Arc<RecordingSetup>,
    }

    fn fixture(settlement_balance: u64, asset_balance: u64) -> Fixture {
        let settlement = Arc::new(FlakyWallet::new(settlement_wallet(settlement_balance)));
        let asset = Arc::new(FlakyWallet::new(asset_wallet(asset_balance)));
        let setup = Arc::new(RecordingSetup::default());
        let coordinator = WalletCoordinator::new(
            settlement.clone(),
            asset.clone(),
            setup.clone(),
        );
        Fixture {
            coordinator,
            settlement,
            asset,
            setup,
        }
    }

    fn test_key() -> AesKey {
        AesKey::new([7u8; 32])
    }

    #[tokio::test]
    async fn test_encrypt_then_query() {
        let f = fixture(1_000, 500);
        let params = KeyDerivationParams::fast_for_tests();

        assert!(!f.coordinator.are_wallets_encrypted().await.unwrap());
        assert!(!f.coordinator.has_trade_key().await);

        f.coordinator
            .encrypt_wallets(params, test_key())
            .await
            .unwrap();

        assert!(f.coordinator.are_wallets_encrypted().await.unwrap());
        assert!(f.coordinator.check_aes_key(&test_key()).await);
        assert!(!f.coordinator.check_aes_key(&AesKey::new([8u8; 32])).await);
        assert!(f.coordinator.has_trade_key().await);
    }

    #[tokio::test]
    async fn test_decrypt_round_trip_preserves_balances() {
        let f = fixture(1_000, 500);
        let key = test_key();

        f.coordinator
            .encrypt_wallets(KeyDerivationParams::fast_for_tests(), AesKey::new(*key.as_bytes()))
            .await
            .unwrap();
        f.coordinator.decrypt_wallets(&key).await.unwrap();

        assert!(!f.coordinator.are_wallets_encrypted().await.unwrap());
        assert!(!f.coordinator.has_trade_key().await);
        assert_eq!(f.settlement.available_balance().await, Amount::new(1_000));
        assert_eq!(f.asset.available_balance().await, Amount::new(500));
    }

    #[tokio::test]
    async fn test_double_encrypt_rejected() {
        let f = fixture(0, 0);
        let params = KeyDerivationParams::fast_for_tests();

        f.coordinator
            .encrypt_wallets(params.clone(), test_key())
            .await
            .unwrap();

        let result = f.coordinator.encrypt_wallets(params, test_key()).await;
        assert!(matches!(result, Err(WalletError::AlreadyEncrypted)));
    }

    #[tokio::test]
    async fn test_decrypt_unencrypted_rejected() {
        let f = fixture(0, 0);
        let result = f.coordinator.decrypt_wallets(&test_key()).await;
        assert!(matches!(result, Err(WalletError::NotEncrypted)));
    }

    #[tokio::test]
    async fn test_decrypt_with_wrong_key_rejected() {
        let f = fixture(0, 0);

        f.coordinator
            .encrypt_wallets(KeyDerivationParams::fast_for_tests(), test_key())
            .await
            .unwrap();

        let result = f.coordinator.decrypt_wallets(&AesKey::new([9u8; 32])).await;
        assert!(matches!(result, Err(WalletError::WrongKey)));
        assert!(f.coordinator.are_wallets_encrypted().await.unwrap());
    }

    #[tokio::test]
    async fn test_has_positive_balance() {
        assert!(fixture(0, 500).coordinator.has_positive_balance().await);
        assert!(!fixture(0, 0).coordinator.has_positive_balance().await);
    }

    #[tokio::test]
    async fn test_are_wallets_available() {
        let f = fixture(0, 0);
        assert!(f.coordinator.are_wallets_available().await);

        f.asset.inner.set_ready(false).await;
        assert!(!f.coordinator.are_wallets_available().await);
    }

    #[tokio::test]
    async fn test_rollback_success_surfaces_only_original_cause() {
        let f = fixture(0, 0);
        f.settlement.fail_encrypt(true);

        let result = f
            .coordinator
            .encrypt_wallets(KeyDerivationParams::fast_for_tests(), test_key())
            .await;

        // The original adapter error comes back, not a PartialState
        assert!(matches!(
            result,
            Err(WalletError::Wallet {
                wallet: WalletKind::Settlement,
                ..
            })
        ));
        assert!(!f.coordinator.are_wallets_encrypted().await.unwrap());
        assert!(f.coordinator.split_state().await.is_none());
        assert!(!f.coordinator.has_trade_key().await);
    }

    #[tokio::test]
    async fn test_failed_rollback_latches_split_state() {
        let f = fixture(0, 0);
        f.settlement.fail_encrypt(true);
        f.asset.fail_decrypt(true);

        let result = f
            .coordinator
            .encrypt_wallets(KeyDerivationParams::fast_for_tests(), test_key())
            .await;

        match result {
            Err(WalletError::PartialState {
                wallet: WalletKind::Asset,
                encrypted: true,
                ..
            }) => {}
            other => panic!("expected PartialState for asset wallet, got {:?}", other),
        }
        assert_eq!(
            f.coordinator.split_state().await,
            Some(SplitState {
                wallet: WalletKind::Asset,
                encrypted: true,
            })
        );

        // Further mutations are blocked until the split is resolved
        f.settlement.fail_encrypt(false);
        f.asset.fail_decrypt(false);
        let blocked = f
            .coordinator
            .encrypt_wallets(KeyDerivationParams::fast_for_tests(), test_key())
            .await;
        assert!(matches!(blocked, Err(WalletError::InvariantViolation { .. })));
        let blocked = f.coordinator.decrypt_wallets(&test_key()).await;
        assert!(matches!(blocked, Err(WalletError::InvariantViolation { .. })));
    }

    #[tokio::test]
    async fn test_decrypt_rollback_reencrypts_asset_wallet() {
        let f = fixture(0, 0);
        let key = test_key();

        f.coordinator
            .encrypt_wallets(
                KeyDerivationParams::fast_for_tests(),
                AesKey::new(*key.as_bytes()),
            )
            .await
            .unwrap();

        f.settlement.fail_decrypt(true);
        let result = f.coordinator.decrypt_wallets(&key).await;

        // The original adapter error comes back, not a PartialState
        assert!(matches!(
            result,
            Err(WalletError::Wallet {
                wallet: WalletKind::Settlement,
                ..
            })
        ));
        // The asset wallet was re-encrypted under the pre-call params, so
        // the set is consistent and still unlockable with the same key
        assert!(f.coordinator.are_wallets_encrypted().await.unwrap());
        assert!(f.coordinator.split_state().await.is_none());
        assert!(f.coordinator.check_aes_key(&key).await);
        assert!(f.coordinator.has_trade_key().await);

        f.settlement.fail_decrypt(false);
        f.coordinator.decrypt_wallets(&key).await.unwrap();
        assert!(!f.coordinator.are_wallets_encrypted().await.unwrap());
    }

    #[tokio::test]
    async fn test_decrypt_failed_rollback_latches_split_state() {
        let f = fixture(0, 0);
        let key = test_key();

        f.coordinator
            .encrypt_wallets(
                KeyDerivationParams::fast_for_tests(),
                AesKey::new(*key.as_bytes()),
            )
            .await
            .unwrap();

        f.settlement.fail_decrypt(true);
        f.asset.fail_encrypt(true);
        let result = f.coordinator.decrypt_wallets(&key).await;

        match result {
            Err(WalletError::PartialState {
                wallet: WalletKind::Asset,
                encrypted: false,
                ..
            }) => {}
            other => panic!("expected PartialState for asset wallet, got {:?}", other),
        }
        assert_eq!(
            f.coordinator.split_state().await,
            Some(SplitState {
                wallet: WalletKind::Asset,
                encrypted: false,
            })
        );

        // Further mutations are blocked until the split is resolved
        f.settlement.fail_decrypt(false);
        f.asset.fail_encrypt(false);
        let blocked = f.coordinator.decrypt_wallets(&key).await;
        assert!(matches!(blocked, Err(WalletError::InvariantViolation { .. })));
        let blocked = f
            .coordinator
            .encrypt_wallets(KeyDerivationParams::fast_for_tests(), test_key())
            .await;
        assert!(matches!(blocked, Err(WalletError::InvariantViolation { .. })));
    }

    #[tokio::test]
    async fn test_resolve_split_state_requires_agreement() {
        let f = fixture(0, 0);
        f.settlement.fail_encrypt(true);
        f.asset.fail_decrypt(true);

        let key = test_key();
        let _ = f
            .coordinator
            .encrypt_wallets(KeyDerivationParams::fast_for_tests(), AesKey::new(*key.as_bytes()))
            .await;

        // Wallets still disagree, so the latch stays
        let result = f.coordinator.resolve_split_state().await;
        assert!(matches!(result, Err(WalletError::InvariantViolation { .. })));

        // Operator repairs the asset wallet out-of-band
        f.asset.fail_decrypt(false);
        f.asset.inner.decrypt(&key).await.unwrap();

        f.coordinator.resolve_split_state().await.unwrap();
        assert!(f.coordinator.split_state().await.is_none());

        // The wallet set is usable again
        f.settlement.fail_encrypt(false);
        f.coordinator
            .encrypt_wallets(KeyDerivationParams::fast_for_tests(), key)
            .await
            .unwrap();
        assert!(f.coordinator.are_wallets_encrypted().await.unwrap());
    }

    #[tokio::test]
    async fn test_key_crypter_params_reused_when_encrypted() {
        let f = fixture(0, 0);
        let params = KeyDerivationParams::fast_for_tests();

        // Unencrypted: fresh parameters every call
        let fresh1 = f.coordinator.key_crypter_params().await;
        let fresh2 = f.coordinator.key_crypter_params().await;
        assert_ne!(fresh1.salt, fresh2.salt);

        f.coordinator
            .encrypt_wallets(params.clone(), test_key())
            .await
            .unwrap();

        // Encrypted: the in-use parameters come back verbatim
        assert_eq!(f.coordinator.key_crypter_params().await, params);
    }

    #[tokio::test]
    async fn test_set_aes_key_propagates_to_all_holders() {
        let f = fixture(0, 0);
        assert!(!f.settlement.inner.has_aes_key().await);
        assert!(!f.asset.inner.has_aes_key().await);

        f.coordinator.set_aes_key(test_key()).await.unwrap();

        assert!(f.coordinator.has_trade_key().await);
        assert!(f.settlement.inner.has_aes_key().await);
        assert!(f.asset.inner.has_aes_key().await);
    }

    #[tokio::test]
    async fn test_get_decrypted_seed_outcomes() {
        let f = fixture(0, 0);
        let key = test_key();
        let crypter = KeyCrypter::new(KeyDerivationParams::fast_for_tests());
        let seed = DeterministicSeed::new(vec![0x33; 32], 1_650_000_000);

        // Encrypted seed + crypter: decrypted copy, input untouched
        let sealed = crypter.encrypt_seed(&seed, &key).unwrap();
        let outcome = f
            .coordinator
            .get_decrypted_seed(&key, &sealed, Some(&crypter))
            .await
            .unwrap();
        assert!(outcome.was_encrypted());
        assert_eq!(outcome.into_seed().entropy(), seed.entropy());
        assert!(sealed.is_encrypted());

        // No crypter + plaintext seed: explicit already-plaintext outcome
        let outcome = f
            .coordinator
            .get_decrypted_seed(&key, &seed, None)
            .await
            .unwrap();
        assert!(!outcome.was_encrypted());
        assert_eq!(outcome.into_seed().entropy(), seed.entropy());

        // No crypter + encrypted seed: caller misuse
        let result = f.coordinator.get_decrypted_seed(&key, &sealed, None).await;
        assert!(matches!(result, Err(WalletError::Decryption(_))));
    }

    #[tokio::test]
    async fn test_chain_seed_creation_time() {
        let f = fixture(0, 0);
        assert_eq!(
            f.coordinator.chain_seed_creation_time_secs().await,
            1_600_000_000
        );
    }

    #[tokio::test]
    async fn test_wallets_as_string_covers_both_wallets() {
        let f = fixture(0, 0);
        let dump = f.coordinator.wallets_as_string(false).await;

        assert!(dump.contains("Settlement wallet:"));
        assert!(dump.contains("Asset wallet:"));
        assert!(!dump.contains(&hex::encode([0x11; 32])));
    }

    #[tokio::test]
    async fn test_setup_passthrough() {
        let f = fixture(0, 0);

        f.coordinator.restore_seed_words(None).await.unwrap();
        f.coordinator.backup_wallets().await.unwrap();
        f.coordinator.backup_wallets().await.unwrap();
        f.coordinator.clear_backup().await.unwrap();

        assert_eq!(f.setup.restores.load(Ordering::SeqCst), 1);
        assert_eq!(f.setup.backups.load(Ordering::SeqCst), 2);
        assert_eq!(f.setup.clears.load(Ordering::SeqCst), 1);
    }
}
