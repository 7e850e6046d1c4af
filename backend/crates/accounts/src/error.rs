//! Accounts Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use thiserror::Error;

use crate::domain::validation::ValidationError;

/// Accounts result type alias
pub type AccountsResult<T> = Result<T, AccountsError>;

/// Accounts error variants
#[derive(Debug, Error)]
pub enum AccountsError {
    /// Neither CPF nor CNPJ supplied
    #[error("CPF or CNPJ must be passed")]
    MissingDocument,

    /// Both CPF and CNPJ supplied
    #[error("choose CPF or CNPJ to create a new user")]
    ConflictingDocuments,

    /// Body failed structural checks
    #[error("{0}")]
    MalformedRequest(String),

    /// Domain rule violated
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("email already in use")]
    EmailTaken,

    #[error("cpf already in use")]
    CpfTaken,

    #[error("cnpj already in use")]
    CnpjTaken,

    #[error("wallet already exists for user")]
    WalletAlreadyExists,

    /// Unknown email or wrong password, deliberately indistinguishable
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Missing or malformed `Authorization` header
    #[error("authorization header is missing or malformed")]
    MissingBearer,

    /// Bad signature, wrong algorithm, expired, wrong issuer or audience
    #[error("invalid or expired token")]
    InvalidToken,

    /// Token subject no longer exists
    #[error("user not found")]
    UserNotFound,

    #[error("{operation} exceeded its deadline")]
    DeadlineExceeded { operation: &'static str },

    #[error("{operation} was cancelled")]
    Cancelled { operation: &'static str },

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("token signing failed: {0}")]
    TokenSigning(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Storage unreachable
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountsError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountsError::MissingDocument
            | AccountsError::ConflictingDocuments
            | AccountsError::MalformedRequest(_) => ErrorKind::BadRequest,
            AccountsError::Validation(_) => ErrorKind::UnprocessableEntity,
            AccountsError::EmailTaken
            | AccountsError::CpfTaken
            | AccountsError::CnpjTaken
            | AccountsError::WalletAlreadyExists => ErrorKind::Conflict,
            AccountsError::InvalidCredentials
            | AccountsError::MissingBearer
            | AccountsError::InvalidToken => ErrorKind::Unauthorized,
            AccountsError::UserNotFound => ErrorKind::NotFound,
            AccountsError::DeadlineExceeded { .. } => ErrorKind::RequestTimeout,
            AccountsError::Cancelled { .. } => ErrorKind::ClientClosedRequest,
            AccountsError::Database(e) => sqlx_error_kind(e),
            AccountsError::Unavailable(_) => ErrorKind::ServiceUnavailable,
            AccountsError::PasswordHash(_)
            | AccountsError::TokenSigning(_)
            | AccountsError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic message; details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::BadRequest => AppError::bad_request(self.to_string()),
            ErrorKind::Unauthorized => AppError::unauthorized(self.to_string()),
            ErrorKind::NotFound => AppError::not_found(self.to_string()),
            ErrorKind::Conflict => AppError::conflict(self.to_string()),
            ErrorKind::UnprocessableEntity => AppError::unprocessable(self.to_string()),
            ErrorKind::InternalServerError => AppError::internal("internal server error"),
            ErrorKind::ServiceUnavailable => AppError::service_unavailable("storage unavailable"),
            kind => AppError::new(kind, self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AccountsError::Database(e) => {
                tracing::error!(error = %e, "Accounts database error");
            }
            AccountsError::PasswordHash(msg) | AccountsError::TokenSigning(msg) => {
                tracing::error!(message = %msg, "Accounts crypto error");
            }
            AccountsError::Unavailable(msg) | AccountsError::Internal(msg) => {
                tracing::error!(message = %msg, "Accounts internal error");
            }
            AccountsError::DeadlineExceeded { operation } => {
                tracing::warn!(operation, "Deadline exceeded");
            }
            AccountsError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Accounts error");
            }
        }
    }
}

impl IntoResponse for AccountsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
