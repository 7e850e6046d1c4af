//! Domain Layer
//!
//! Contains entities, value objects, validation rules and the traits the
//! application layer depends on.

pub mod entity;
pub mod repository;
pub mod service;
pub mod validation;
pub mod value_object;

// Re-exports
pub use entity::{
    user::{NewUser, User},
    wallet::{NewWallet, Wallet},
};
pub use repository::{UserRepository, WalletRepository};
pub use service::{CredentialHasher, TokenClaims, TokenIssuer, WalletProvisioner};
