//! Contract of the external setup orchestrator
//!
//! Seed backup/restore and initial wallet bring-up live outside the core;
//! the coordinator forwards these calls and their outcomes unchanged and
//! imposes no invariant on them.

use async_trait::async_trait;

use crate::error::Result;
use crate::seed::DeterministicSeed;

#[async_trait]
pub trait SetupOrchestrator: Send + Sync {
    /// Re-initialize the wallet set from `seed`, or from fresh entropy when
    /// `None`
    async fn restore_seed_words(&self, seed: Option<DeterministicSeed>) -> Result<()>;

    async fn backup_wallets(&self) -> Result<()>;

    async fn clear_backups(&self) -> Result<()>;
}
