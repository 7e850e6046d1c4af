//! Collaborator Traits
//!
//! Hashing, token and wallet contracts the use cases depend on.

use std::time::Duration;

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::wallet::Wallet;
use crate::domain::value_object::password::{PasswordDigest, RawPassword};
use crate::error::AccountsResult;

/// One-way password hashing
#[trait_variant::make(CredentialHasher: Send)]
pub trait LocalCredentialHasher {
    /// Salted digest; hashing the same password twice gives different digests
    async fn hash(&self, password: &RawPassword) -> AccountsResult<PasswordDigest>;

    /// `Ok(false)` on mismatch; `Err` only when the hasher itself fails
    async fn verify(&self, password: &RawPassword, digest: &PasswordDigest)
    -> AccountsResult<bool>;

    /// Digest with production cost that matches no account
    ///
    /// Login verifies against it when the email is unknown, so both failure
    /// paths pay for one verification.
    fn decoy_digest(&self) -> &PasswordDigest;
}

/// Claims recovered from a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub subject: UserId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies bearer tokens
pub trait TokenIssuer: Send + Sync {
    fn generate_token(&self, subject: UserId, ttl: Duration) -> AccountsResult<String>;

    /// Every failure is the same `InvalidToken`
    fn validate_token(&self, token: &str) -> AccountsResult<TokenClaims>;
}

/// Opens the wallet belonging to a user
#[trait_variant::make(WalletProvisioner: Send)]
pub trait LocalWalletProvisioner {
    async fn create(&self, user_id: UserId, balance: i64) -> AccountsResult<Wallet>;
}
