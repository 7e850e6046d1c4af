//! Sign Up Use Case
//!
//! Registers a user and opens their wallet.
//!
//! The user insert and the wallet insert are separate writes. When the wallet
//! cannot be created the user row is removed again, and whatever survives a
//! failed removal is picked up by [`ReconcileWalletsUseCase`].
//!
//! [`ReconcileWalletsUseCase`]: crate::application::reconcile::ReconcileWalletsUseCase

use std::sync::Arc;

use kernel::id::{UserId, WalletId};

use crate::application::config::AccountsConfig;
use crate::application::context::RequestContext;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::service::{CredentialHasher, WalletProvisioner};
use crate::domain::value_object::{
    email::Email, password::RawPassword, tax_document::TaxDocument,
};
use crate::error::{AccountsError, AccountsResult};

/// Sign up input
pub struct SignUpInput {
    pub full_name: String,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub email: String,
    pub password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: UserId,
    pub wallet_id: WalletId,
}

/// Sign up use case
pub struct SignUpUseCase<U, W, H>
where
    U: UserRepository,
    W: WalletProvisioner,
    H: CredentialHasher,
{
    user_repo: Arc<U>,
    wallets: Arc<W>,
    hasher: Arc<H>,
    config: Arc<AccountsConfig>,
}

impl<U, W, H> SignUpUseCase<U, W, H>
where
    U: UserRepository + Sync,
    W: WalletProvisioner + Sync,
    H: CredentialHasher + Sync,
{
    pub fn new(
        user_repo: Arc<U>,
        wallets: Arc<W>,
        hasher: Arc<H>,
        config: Arc<AccountsConfig>,
    ) -> Self {
        Self {
            user_repo,
            wallets,
            hasher,
            config,
        }
    }

    pub async fn execute(
        &self,
        ctx: &RequestContext,
        input: SignUpInput,
    ) -> AccountsResult<SignUpOutput> {
        // Exactly one document, decided before touching storage
        let document = TaxDocument::from_choice(input.cpf, input.cnpj)?;
        let email = Email::new(input.email);

        // Uniqueness fast path; the insert's constraints have the final word
        if ctx
            .run("find_by_email", self.user_repo.find_by_email(&email))
            .await?
            .is_some()
        {
            return Err(AccountsError::EmailTaken);
        }

        let holder = match &document {
            TaxDocument::Cpf(cpf) => {
                ctx.run("find_by_cpf", self.user_repo.find_by_cpf(cpf))
                    .await?
            }
            TaxDocument::Cnpj(cnpj) => {
                ctx.run("find_by_cnpj", self.user_repo.find_by_cnpj(cnpj))
                    .await?
            }
        };
        if holder.is_some() {
            return Err(document.taken_error());
        }

        let password = RawPassword::new(input.password);
        let password_hash = ctx
            .run("hash_password", self.hasher.hash(&password))
            .await?;

        let user = NewUser::new(input.full_name, document, email, password_hash);
        user.validate(&password)?;

        let user_id = ctx.run("save_user", self.user_repo.save(&user)).await?;

        let wallet = match ctx
            .run("create_wallet", self.wallets.create(user_id, 0))
            .await
        {
            Ok(wallet) => wallet,
            Err(err) => {
                self.compensate(user_id, &err).await;
                return Err(err);
            }
        };

        tracing::info!(
            user_id = %user_id,
            wallet_id = %wallet.id,
            role = %user.role(),
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id,
            wallet_id: wallet.id,
        })
    }

    /// Remove a user whose wallet could not be created
    ///
    /// Runs under its own deadline so a cancelled or expired request still
    /// gets cleaned up.
    async fn compensate(&self, user_id: UserId, cause: &AccountsError) {
        let cleanup = RequestContext::with_timeout(self.config.request_timeout);

        match cleanup
            .run("delete_user", self.user_repo.delete(user_id))
            .await
        {
            Ok(()) => {
                tracing::warn!(
                    user_id = %user_id,
                    cause = %cause,
                    "Wallet creation failed, user removed"
                );
            }
            Err(e) => {
                tracing::error!(
                    user_id = %user_id,
                    cause = %cause,
                    error = %e,
                    "Wallet creation failed and user removal failed, left for reconciliation"
                );
            }
        }
    }
}
