//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.
//!
//! Absence is `Ok(None)`. An `Err` always means the store failed.

use kernel::id::{UserId, WalletId};

use crate::domain::entity::{
    user::{NewUser, User},
    wallet::{NewWallet, Wallet},
};
use crate::domain::value_object::email::Email;
use crate::error::AccountsResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert and return the storage-assigned id
    ///
    /// A uniqueness violation on email, CPF or CNPJ is reported as the
    /// matching conflict error.
    async fn save(&self, user: &NewUser) -> AccountsResult<UserId>;

    async fn find_by_cpf(&self, cpf: &str) -> AccountsResult<Option<User>>;

    async fn find_by_cnpj(&self, cnpj: &str) -> AccountsResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AccountsResult<Option<User>>;

    async fn find_by_id(&self, user_id: UserId) -> AccountsResult<Option<User>>;

    /// Remove a user that never got a wallet
    async fn delete(&self, user_id: UserId) -> AccountsResult<()>;
}

/// Wallet repository trait
#[trait_variant::make(WalletRepository: Send)]
pub trait LocalWalletRepository {
    /// Insert and return the storage-assigned id
    async fn save(&self, wallet: &NewWallet) -> AccountsResult<WalletId>;

    async fn find_by_user_id(&self, user_id: UserId) -> AccountsResult<Option<Wallet>>;

    /// Users with no wallet row, oldest first
    async fn find_users_without_wallet(&self, limit: i64) -> AccountsResult<Vec<UserId>>;
}
