//! Accounts Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::repository::{UserRepository, WalletRepository};
use crate::error::AccountsResult;
use crate::infra::{Argon2CredentialHasher, JwtTokenIssuer, PgAccountStore};
use crate::presentation::handlers::{self, AccountsAppState};
use crate::presentation::middleware::require_bearer;

/// Create the Accounts router with PostgreSQL repository
pub fn accounts_router(repo: PgAccountStore, config: AccountsConfig) -> AccountsResult<Router> {
    accounts_router_generic(repo, config)
}

/// Create a generic Accounts router for any repository implementation
///
/// Fails when the token secret is empty or the Argon2 cost is rejected.
pub fn accounts_router_generic<R>(repo: R, config: AccountsConfig) -> AccountsResult<Router>
where
    R: UserRepository + WalletRepository + Clone + Send + Sync + 'static,
{
    let state = AccountsAppState {
        repo: Arc::new(repo),
        hasher: Arc::new(Argon2CredentialHasher::new(
            config.password_cost,
            config.pepper(),
        )?),
        tokens: Arc::new(JwtTokenIssuer::new(&config)?),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/me", get(handlers::me::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer::<R>,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/signup", post(handlers::sign_up::<R>))
        .route("/auth/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state))
}
