//! Profile Use Case
//!
//! Loads the wallet shown next to an authenticated user.

use std::sync::Arc;

use crate::application::context::RequestContext;
use crate::domain::entity::{user::User, wallet::Wallet};
use crate::domain::repository::WalletRepository;
use crate::error::AccountsResult;

/// Profile output
pub struct Profile {
    pub user: User,
    /// `None` only for users awaiting reconciliation
    pub wallet: Option<Wallet>,
}

pub struct ProfileUseCase<W>
where
    W: WalletRepository,
{
    wallet_repo: Arc<W>,
}

impl<W> ProfileUseCase<W>
where
    W: WalletRepository + Sync,
{
    pub fn new(wallet_repo: Arc<W>) -> Self {
        Self { wallet_repo }
    }

    pub async fn execute(&self, ctx: &RequestContext, user: User) -> AccountsResult<Profile> {
        let wallet = ctx
            .run("find_wallet", self.wallet_repo.find_by_user_id(user.id))
            .await?;

        Ok(Profile { user, wallet })
    }
}
