//! Accounts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, validation rules, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations and crypto adapters
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Signup with either a CPF (common user) or a CNPJ (shopkeeper)
//! - A zero-balance wallet provisioned for every new user
//! - Login with email + password, answered with a signed bearer token
//! - Bearer-protected profile lookup
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, NFKC-normalized, optional pepper
//! - HS256 tokens with issuer, audience and expiry checked on every request
//! - Unknown email and wrong password are indistinguishable to callers

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountsConfig;
pub use error::{AccountsError, AccountsResult};
pub use infra::memory::InMemoryAccountStore;
pub use infra::postgres::PgAccountStore;
pub use presentation::router::accounts_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
