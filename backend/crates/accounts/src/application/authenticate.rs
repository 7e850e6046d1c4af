//! Authenticate Use Case
//!
//! Resolves a bearer token to the user it was issued for.

use std::sync::Arc;

use crate::application::context::RequestContext;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::service::TokenIssuer;
use crate::error::{AccountsError, AccountsResult};

pub struct AuthenticateUseCase<U, T>
where
    U: UserRepository,
    T: TokenIssuer,
{
    user_repo: Arc<U>,
    tokens: Arc<T>,
}

impl<U, T> AuthenticateUseCase<U, T>
where
    U: UserRepository + Sync,
    T: TokenIssuer,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<T>) -> Self {
        Self { user_repo, tokens }
    }

    /// A valid token whose subject was removed yields `UserNotFound`
    pub async fn execute(&self, ctx: &RequestContext, token: &str) -> AccountsResult<User> {
        let claims = self.tokens.validate_token(token)?;

        ctx.run("find_by_id", self.user_repo.find_by_id(claims.subject))
            .await?
            .ok_or(AccountsError::UserNotFound)
    }
}
