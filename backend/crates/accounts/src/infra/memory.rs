//! In-memory Repository Implementation
//!
//! Behaves like the PostgreSQL store (sequential ids, unique email, CPF, CNPJ
//! and wallet owner) without a database. Records every call so tests can
//! assert on what was touched, and can be switched offline to simulate an
//! unreachable store.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use kernel::id::{UserId, WalletId};

use crate::domain::entity::{
    user::{NewUser, User},
    wallet::{NewWallet, Wallet},
};
use crate::domain::repository::{UserRepository, WalletRepository};
use crate::domain::value_object::{
    email::Email, password::PasswordDigest, tax_document::TaxDocument,
};
use crate::error::{AccountsError, AccountsResult};

#[derive(Default)]
struct State {
    users: BTreeMap<UserId, User>,
    wallets: BTreeMap<WalletId, Wallet>,
    last_user_id: i64,
    last_wallet_id: i64,
    calls: Vec<&'static str>,
    offline: bool,
}

#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails with `Unavailable`
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.offline = offline;
        }
    }

    /// Names of the repository methods called so far, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.state
            .lock()
            .map(|state| state.calls.clone())
            .unwrap_or_default()
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().map(|s| s.users.len()).unwrap_or_default()
    }

    pub fn wallet_count(&self) -> usize {
        self.state.lock().map(|s| s.wallets.len()).unwrap_or_default()
    }

    pub fn user(&self, user_id: UserId) -> Option<User> {
        self.state.lock().ok()?.users.get(&user_id).cloned()
    }

    pub fn wallet_of(&self, user_id: UserId) -> Option<Wallet> {
        self.state
            .lock()
            .ok()?
            .wallets
            .values()
            .find(|w| w.user_id == user_id)
            .cloned()
    }

    /// Insert a common user directly, bypassing the call log
    pub fn seed_user(&self, email: &str, cpf: &str) -> UserId {
        let user = NewUser::new(
            "Seeded User",
            TaxDocument::Cpf(cpf.to_string()),
            Email::new(email),
            PasswordDigest::new("seeded"),
        );
        match self.state.lock() {
            Ok(mut state) => insert_user(&mut state, &user).unwrap_or(UserId::new(0)),
            Err(_) => UserId::new(0),
        }
    }

    fn enter(&self, call: &'static str) -> AccountsResult<MutexGuard<'_, State>> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| AccountsError::Internal("in-memory store poisoned".to_string()))?;

        state.calls.push(call);

        if state.offline {
            return Err(AccountsError::Unavailable("in-memory store offline".to_string()));
        }

        Ok(state)
    }
}

fn insert_user(state: &mut State, user: &NewUser) -> AccountsResult<UserId> {
    for existing in state.users.values() {
        if existing.email == user.email {
            return Err(AccountsError::EmailTaken);
        }
        if existing.document == user.document {
            return Err(user.document.taken_error());
        }
    }

    state.last_user_id += 1;
    let id = UserId::new(state.last_user_id);
    state.users.insert(id, user.clone().into_user(id));
    Ok(id)
}

fn find_user(state: &State, predicate: impl Fn(&User) -> bool) -> Option<User> {
    state.users.values().find(|u| predicate(u)).cloned()
}

impl UserRepository for InMemoryAccountStore {
    async fn save(&self, user: &NewUser) -> AccountsResult<UserId> {
        let mut state = self.enter("users.save")?;
        insert_user(&mut state, user)
    }

    async fn find_by_cpf(&self, cpf: &str) -> AccountsResult<Option<User>> {
        let state = self.enter("users.find_by_cpf")?;
        Ok(find_user(&state, |u| u.document.cpf() == Some(cpf)))
    }

    async fn find_by_cnpj(&self, cnpj: &str) -> AccountsResult<Option<User>> {
        let state = self.enter("users.find_by_cnpj")?;
        Ok(find_user(&state, |u| u.document.cnpj() == Some(cnpj)))
    }

    async fn find_by_email(&self, email: &Email) -> AccountsResult<Option<User>> {
        let state = self.enter("users.find_by_email")?;
        Ok(find_user(&state, |u| &u.email == email))
    }

    async fn find_by_id(&self, user_id: UserId) -> AccountsResult<Option<User>> {
        let state = self.enter("users.find_by_id")?;
        Ok(state.users.get(&user_id).cloned())
    }

    async fn delete(&self, user_id: UserId) -> AccountsResult<()> {
        let mut state = self.enter("users.delete")?;
        state.users.remove(&user_id);
        Ok(())
    }
}

impl WalletRepository for InMemoryAccountStore {
    async fn save(&self, wallet: &NewWallet) -> AccountsResult<WalletId> {
        let mut state = self.enter("wallets.save")?;

        if !state.users.contains_key(&wallet.user_id) {
            return Err(AccountsError::UserNotFound);
        }
        if state.wallets.values().any(|w| w.user_id == wallet.user_id) {
            return Err(AccountsError::WalletAlreadyExists);
        }

        state.last_wallet_id += 1;
        let id = WalletId::new(state.last_wallet_id);
        state.wallets.insert(id, wallet.clone().into_wallet(id));
        Ok(id)
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AccountsResult<Option<Wallet>> {
        let state = self.enter("wallets.find_by_user_id")?;
        Ok(state
            .wallets
            .values()
            .find(|w| w.user_id == user_id)
            .cloned())
    }

    async fn find_users_without_wallet(&self, limit: i64) -> AccountsResult<Vec<UserId>> {
        let state = self.enter("wallets.find_users_without_wallet")?;
        let limit = usize::try_from(limit).unwrap_or_default();
        Ok(state
            .users
            .keys()
            .filter(|id| !state.wallets.values().any(|w| w.user_id == **id))
            .take(limit)
            .copied()
            .collect())
    }
}
