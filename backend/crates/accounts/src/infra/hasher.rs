//! Argon2id Credential Hasher
//!
//! Runs `platform::password` on the blocking pool so hashing never stalls
//! the async workers.

use std::sync::Arc;

use platform::password::{HashCost, HashedPassword, PasswordHasher};

use crate::domain::service::CredentialHasher;
use crate::domain::value_object::password::{PasswordDigest, RawPassword};
use crate::error::{AccountsError, AccountsResult};

/// Hashed once at construction to back [`CredentialHasher::decoy_digest`]
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

#[derive(Debug, Clone)]
pub struct Argon2CredentialHasher {
    inner: Arc<PasswordHasher>,
    decoy: PasswordDigest,
}

impl Argon2CredentialHasher {
    /// Runs one Argon2 hash with `cost` to produce the decoy digest
    pub fn new(cost: HashCost, pepper: Option<&[u8]>) -> AccountsResult<Self> {
        let inner =
            PasswordHasher::new(cost, pepper).map_err(|e| AccountsError::PasswordHash(e.to_string()))?;

        let decoy = inner
            .hash(RawPassword::new(DECOY_PASSWORD.to_string()).as_clear_text())
            .map_err(|e| AccountsError::PasswordHash(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(inner),
            decoy: PasswordDigest::new(decoy.as_phc_string()),
        })
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: &RawPassword) -> AccountsResult<PasswordDigest> {
        let hasher = Arc::clone(&self.inner);
        let password = password.duplicate();

        let hashed = tokio::task::spawn_blocking(move || hasher.hash(password.as_clear_text()))
            .await
            .map_err(|e| AccountsError::PasswordHash(e.to_string()))?
            .map_err(|e| AccountsError::PasswordHash(e.to_string()))?;

        Ok(PasswordDigest::new(hashed.as_phc_string()))
    }

    async fn verify(
        &self,
        password: &RawPassword,
        digest: &PasswordDigest,
    ) -> AccountsResult<bool> {
        let hashed = match HashedPassword::from_phc_string(digest.as_str()) {
            Ok(h) => h,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password digest is unreadable");
                return Ok(false);
            }
        };

        let hasher = Arc::clone(&self.inner);
        let password = password.duplicate();

        tokio::task::spawn_blocking(move || hasher.verify(password.as_clear_text(), &hashed))
            .await
            .map_err(|e| AccountsError::PasswordHash(e.to_string()))
    }

    fn decoy_digest(&self) -> &PasswordDigest {
        &self.decoy
    }
}
