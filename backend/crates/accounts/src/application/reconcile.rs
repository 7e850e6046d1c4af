//! Reconcile Wallets Use Case
//!
//! Opens a zero-balance wallet for every user that has none. Such users exist
//! only when a signup's compensating delete failed.

use std::sync::Arc;

use crate::application::context::RequestContext;
use crate::domain::repository::WalletRepository;
use crate::domain::service::WalletProvisioner;
use crate::error::{AccountsError, AccountsResult};

/// Users fetched per round trip
pub const DEFAULT_BATCH_SIZE: i64 = 100;

pub struct ReconcileWalletsUseCase<W, P>
where
    W: WalletRepository,
    P: WalletProvisioner,
{
    wallet_repo: Arc<W>,
    wallets: Arc<P>,
    batch_size: i64,
}

impl<W, P> ReconcileWalletsUseCase<W, P>
where
    W: WalletRepository + Sync,
    P: WalletProvisioner + Sync,
{
    pub fn new(wallet_repo: Arc<W>, wallets: Arc<P>) -> Self {
        Self {
            wallet_repo,
            wallets,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(self, batch_size: i64) -> Self {
        Self {
            batch_size: batch_size.max(1),
            ..self
        }
    }

    /// Returns the number of wallets created
    ///
    /// A wallet that appears concurrently is skipped. Any other failure
    /// stops the run.
    pub async fn execute(&self, ctx: &RequestContext) -> AccountsResult<usize> {
        let mut created = 0;

        loop {
            let batch = ctx
                .run(
                    "find_users_without_wallet",
                    self.wallet_repo.find_users_without_wallet(self.batch_size),
                )
                .await?;

            for user_id in &batch {
                match ctx
                    .run("create_wallet", self.wallets.create(*user_id, 0))
                    .await
                {
                    Ok(_) => created += 1,
                    Err(AccountsError::WalletAlreadyExists) => {
                        tracing::debug!(user_id = %user_id, "Wallet appeared concurrently");
                    }
                    Err(e) => return Err(e),
                }
            }

            if (batch.len() as i64) < self.batch_size {
                break;
            }
        }

        if created > 0 {
            tracing::info!(wallets_created = created, "Reconciled walletless users");
        }

        Ok(created)
    }
}
