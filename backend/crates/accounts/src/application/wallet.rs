//! Wallet Service
//!
//! Production `WalletProvisioner`: validates and stores a new wallet.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::wallet::{NewWallet, Wallet};
use crate::domain::repository::WalletRepository;
use crate::domain::service::WalletProvisioner;
use crate::error::AccountsResult;

pub struct WalletService<W>
where
    W: WalletRepository,
{
    wallet_repo: Arc<W>,
}

impl<W> WalletService<W>
where
    W: WalletRepository,
{
    pub fn new(wallet_repo: Arc<W>) -> Self {
        Self { wallet_repo }
    }
}

impl<W> WalletProvisioner for WalletService<W>
where
    W: WalletRepository + Sync,
{
    async fn create(&self, user_id: UserId, balance: i64) -> AccountsResult<Wallet> {
        let wallet = NewWallet::opening(user_id, balance);
        wallet.validate()?;

        let wallet_id = self.wallet_repo.save(&wallet).await?;

        tracing::info!(
            user_id = %user_id,
            wallet_id = %wallet_id,
            "Wallet created"
        );

        Ok(wallet.into_wallet(wallet_id))
    }
}
