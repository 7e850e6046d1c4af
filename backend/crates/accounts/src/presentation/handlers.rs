//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::{
    LoginUseCase, ProfileUseCase, RequestContext, SignUpUseCase, WalletService,
};
use crate::domain::repository::{UserRepository, WalletRepository};
use crate::error::{AccountsError, AccountsResult};
use crate::infra::{Argon2CredentialHasher, JwtTokenIssuer};
use crate::presentation::dto::{
    HealthResponse, LoginRequest, LoginResponse, MeResponse, SignUpRequest,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountsAppState<R>
where
    R: UserRepository + WalletRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountsConfig>,
    pub hasher: Arc<Argon2CredentialHasher>,
    pub tokens: Arc<JwtTokenIssuer>,
}

impl<R> AccountsAppState<R>
where
    R: UserRepository + WalletRepository + Clone + Send + Sync + 'static,
{
    /// Deadline for the request being served
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.config.request_timeout)
    }
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> AccountsResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable request body");
        AccountsError::MalformedRequest("error parsing body request".to_string())
    })
}

// ============================================================================
// Health
// ============================================================================

/// GET /v1/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { message: "ok" })
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /v1/auth/signup
pub async fn sign_up<R>(
    State(state): State<AccountsAppState<R>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AccountsResult<StatusCode>
where
    R: UserRepository + WalletRepository + Clone + Send + Sync + 'static,
{
    let req = parse_body(payload)?;
    req.validate()?;

    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        Arc::new(WalletService::new(state.repo.clone())),
        state.hasher.clone(),
        state.config.clone(),
    );

    use_case
        .execute(&state.request_context(), req.into())
        .await?;

    Ok(StatusCode::CREATED)
}

// ============================================================================
// Login
// ============================================================================

/// POST /v1/auth/login
pub async fn login<R>(
    State(state): State<AccountsAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AccountsResult<Json<LoginResponse>>
where
    R: UserRepository + WalletRepository + Clone + Send + Sync + 'static,
{
    let req = parse_body(payload)?;
    req.validate()?;

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(&state.request_context(), req.into())
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
    }))
}

// ============================================================================
// Current user (requires bearer token)
// ============================================================================

/// GET /v1/me
pub async fn me<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> AccountsResult<Json<MeResponse>>
where
    R: UserRepository + WalletRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let profile = use_case.execute(&state.request_context(), user).await?;

    Ok(Json(profile.into()))
}
