//! Bearer Middleware
//!
//! Requires `Authorization: Bearer <token>` on protected routes and hands the
//! resolved user to handlers as an [`AuthenticatedUser`] extension.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::AuthenticateUseCase;
use crate::domain::entity::user::User;
use crate::domain::repository::{UserRepository, WalletRepository};
use crate::error::{AccountsError, AccountsResult};
use crate::presentation::handlers::AccountsAppState;

/// User resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

fn bearer_token(headers: &HeaderMap) -> AccountsResult<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AccountsError::MissingBearer)
}

/// Middleware that requires a valid bearer token
pub async fn require_bearer<R>(
    State(state): State<AccountsAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> AccountsResult<Response>
where
    R: UserRepository + WalletRepository + Clone + Send + Sync + 'static,
{
    let token = bearer_token(req.headers())?.to_string();

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.tokens.clone());
    let user = use_case.execute(&state.request_context(), &token).await?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}
