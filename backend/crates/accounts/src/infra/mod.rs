//! Infrastructure Layer
//!
//! Database implementations and crypto adapters.

pub mod hasher;
pub mod jwt;
pub mod memory;
pub mod postgres;

pub use hasher::Argon2CredentialHasher;
pub use jwt::JwtTokenIssuer;
pub use memory::InMemoryAccountStore;
pub use postgres::PgAccountStore;
